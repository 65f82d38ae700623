//! layerseek — attribute and file search core for a GIS host plugin.
//!
//! The plugin presents one dialog with two search surfaces:
//!
//! - **Attribute search**: a free-word keyword matched case-insensitively
//!   against every string field of the selected vector layer, optionally
//!   narrowed by one refinement condition, joined with AND/OR. The
//!   condition set is translated into a filter expression in the host's
//!   expression grammar and executed by the host.
//! - **File search**: a recursive scan of a chosen folder matching file
//!   names against the same keywords (see the `filesearch` crate).
//!
//! The host application (layer registry, query engine, map canvas, message
//! bar, settings storage) sits behind the traits in [`host`] and
//! [`settings`]; everything here runs synchronously on the calling thread.

pub mod dialog;
pub mod error;
pub mod expression;
pub mod host;
pub mod layer;
pub mod message;
pub mod search;
pub mod settings;
pub mod state;

// Re-export main types
pub use dialog::SearchDialog;
pub use error::{Result, SearchError};
pub use expression::{
    build_contains_over_fields, build_refinement, build_typed_comparison, combine, Comparator,
    FilterExpression, JoinPolicy, MatchMode,
};
pub use host::{Feature, FeatureId, LayerRegistry, MapView, MessageSink, QueryError, VectorLayer};
pub use layer::{describe_fields, FieldDescriptor, FieldKind, LayerSummary, RawField};
pub use message::Severity;
pub use search::{execute, run_search, zoom_to_feature, Refinement, SearchOutcome, SearchRequest};
pub use settings::{FileStore, MemoryStore, SettingsStore};
pub use state::{DialogState, RefinementScope};
