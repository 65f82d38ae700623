//! Host capability traits.
//!
//! The GIS host (layer registry, query engine, map canvas, message bar) is
//! reached only through these traits, so the controllers can be exercised
//! against scripted doubles in tests. All methods take `&self`: host handles
//! are reference-like objects with interior state on the host side.

use crate::expression::FilterExpression;
use crate::layer::RawField;
use crate::message::Severity;

/// Stable feature identifier within a layer.
pub type FeatureId = i64;

/// A feature returned by query execution: its id plus the attribute values
/// in schema order, for table display. Missing values stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: FeatureId,
    pub attributes: Vec<Option<String>>,
}

/// Failure reported by the host's query execution.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The expression did not parse. The message is the engine's own,
    /// reported to the user verbatim.
    #[error("{0}")]
    Parse(String),

    /// The expression parsed but evaluation failed.
    #[error("{0}")]
    Execution(String),
}

/// Handle to one vector layer in the host project.
pub trait VectorLayer {
    /// Stable identifier, unique within the project.
    fn id(&self) -> String;

    fn name(&self) -> String;

    /// Schema fields in layer order, with the provider's type names.
    fn fields(&self) -> Vec<RawField>;

    /// Geometry display string, `None` when the handle is not
    /// vector-compatible (raster or unknown).
    fn geometry(&self) -> Option<String>;

    fn provider_type(&self) -> String;

    fn source(&self) -> String;

    /// Provider encoding when the data source exposes one. `None` means
    /// unsupported, not an error.
    fn encoding(&self) -> Option<String>;

    /// Compiles and runs a filter expression, returning matching features.
    fn query(&self, expression: &FilterExpression) -> Result<Vec<Feature>, QueryError>;

    /// Replaces the layer's highlighted selection.
    fn select(&self, ids: &[FeatureId]);

    fn clear_selection(&self);
}

/// The host project's layer registry.
pub trait LayerRegistry {
    type Layer: VectorLayer;

    /// Names of the currently loaded vector layers, sorted
    /// case-insensitively.
    fn vector_layer_names(&self) -> Vec<String>;

    fn layer_by_name(&self, name: &str) -> Option<Self::Layer>;

    fn layer_by_id(&self, id: &str) -> Option<Self::Layer>;
}

/// The host's map canvas.
pub trait MapView {
    /// Pans/zooms to the layer's current selection.
    fn zoom_to_selected(&self, layer: &dyn VectorLayer);
}

/// The host's transient notification surface.
pub trait MessageSink {
    fn notify(&self, severity: Severity, title: &str, body: &str);
}
