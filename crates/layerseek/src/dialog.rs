//! Dialog facade: state, persistence, and search wiring.
//!
//! [`SearchDialog`] is the model behind the host's dialog window. It owns
//! the persisted [`DialogState`], resolves the selected layer through the
//! injected registry, and drives both the attribute search and the file
//! search. The host UI mirrors widget changes into the state via
//! [`SearchDialog::update`], which persists after every accepted mutation.

use std::path::Path;

use tracing::warn;

use filesearch::{
    scan_folder, ExtensionFilter, FileSearchError, NameMatcher, ScanOutcome, TokenJoin,
    MAX_DISPLAYED,
};

use crate::error::Result;
use crate::expression::JoinPolicy;
use crate::host::{LayerRegistry, MapView, MessageSink, VectorLayer};
use crate::layer::LayerSummary;
use crate::message::Severity;
use crate::search::{self, Refinement, SearchOutcome, SearchRequest};
use crate::settings::SettingsStore;
use crate::state::{DialogState, RefinementScope};

pub struct SearchDialog<R: LayerRegistry, S: SettingsStore> {
    registry: R,
    store: S,
    state: DialogState,
    /// Layer that most recently held a selection, so a clear can drop that
    /// selection even after the combo moved on.
    last_layer_id: Option<String>,
}

impl<R: LayerRegistry, S: SettingsStore> SearchDialog<R, S> {
    /// Opens the dialog model: loads persisted state and applies the
    /// startup policy (advanced section collapsed, refinement off).
    pub fn open(registry: R, store: S) -> Result<Self> {
        let state = store.load()?.restored();
        Ok(Self {
            registry,
            store,
            state,
            last_layer_id: None,
        })
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Applies a state mutation and persists it. The host calls this after
    /// every accepted widget change; saving the same state twice is
    /// harmless.
    pub fn update(&mut self, apply: impl FnOnce(&mut DialogState)) -> Result<()> {
        apply(&mut self.state);
        self.store.save(&self.state)
    }

    // -----------------------------------------------------------------------
    // Layer selection
    // -----------------------------------------------------------------------

    /// Vector layer names for the layer combo, sorted by the registry.
    pub fn layer_names(&self) -> Vec<String> {
        self.registry.vector_layer_names()
    }

    /// Resolves the currently selected layer, fresh on every call.
    pub fn current_layer(&self) -> Option<R::Layer> {
        let name = self.state.layer_name.trim();
        if name.is_empty() {
            return None;
        }
        self.registry.layer_by_name(name)
    }

    /// Selects a layer by name and returns its summary for the info line.
    /// An unknown name leaves the selection effectively empty.
    pub fn select_layer(&mut self, name: &str) -> Result<Option<LayerSummary>> {
        self.state.layer_name = name.to_string();
        let layer = self.current_layer();
        if let Some(layer) = &layer {
            self.last_layer_id = Some(layer.id());
        }
        self.store.save(&self.state)?;
        Ok(layer.map(|layer| LayerSummary::from_layer(&layer)))
    }

    /// Summary of the current layer, or `None` when nothing is selected.
    pub fn layer_summary(&self) -> Option<LayerSummary> {
        self.current_layer()
            .map(|layer| LayerSummary::from_layer(&layer))
    }

    /// Drops the layer selection: clears the previous layer's highlighted
    /// features and empties the combo state.
    pub fn unselect_layer(&mut self) -> Result<()> {
        if let Some(id) = self.last_layer_id.take() {
            if let Some(layer) = self.registry.layer_by_id(&id) {
                layer.clear_selection();
            }
        }
        self.state.layer_name.clear();
        self.store.save(&self.state)
    }

    // -----------------------------------------------------------------------
    // Searches
    // -----------------------------------------------------------------------

    /// Runs the attribute search with the current state and persists the
    /// state afterwards.
    pub fn run_attribute_search(
        &mut self,
        view: &dyn MapView,
        messages: &dyn MessageSink,
    ) -> Option<SearchOutcome> {
        let request = self.attribute_request();
        let layer = self.current_layer();
        if let Some(layer) = &layer {
            self.last_layer_id = Some(layer.id());
        }
        let outcome = search::run_search(
            layer.as_ref().map(|layer| layer as &dyn VectorLayer),
            &request,
            view,
            messages,
        );
        if let Err(err) = self.store.save(&self.state) {
            // Persistence is best-effort after a search; the search outcome
            // already produced its one user-visible message.
            warn!(error = %err, "failed to persist dialog state");
        }
        outcome
    }

    fn attribute_request(&self) -> SearchRequest {
        let refinement = if self.state.use_refinement {
            Some(match self.state.scope {
                RefinementScope::NamedField => Refinement::TypedField {
                    field: self.state.field_name.clone(),
                    term: self.state.refinement_text.clone(),
                    comparator: self.state.comparator,
                },
                RefinementScope::AllStringFields => Refinement::AcrossFields {
                    term: self.state.refinement_text.clone(),
                    mode: self.state.match_mode,
                },
            })
        } else {
            None
        };
        SearchRequest {
            free_text: self.state.free_text.clone(),
            join: self.state.join,
            refinement,
        }
    }

    /// Runs the file search over the configured folder, reusing the
    /// attribute keywords as file-name tokens.
    pub fn run_file_search(&mut self, messages: &dyn MessageSink) -> Option<ScanOutcome> {
        match self.file_search() {
            Ok(outcome) => {
                let body = if outcome.truncated() {
                    format!(
                        "{} files found (showing first {MAX_DISPLAYED})",
                        outcome.total
                    )
                } else {
                    format!("{} files found", outcome.total)
                };
                messages.notify(Severity::Info, "file search", &body);
                Some(outcome)
            }
            Err(err) => {
                let severity = match &err {
                    FileSearchError::NoKeywordProvided => Severity::Info,
                    FileSearchError::NoBaseFolder | FileSearchError::FolderNotFound(_) => {
                        Severity::Warning
                    }
                    FileSearchError::Traversal(_) => Severity::Critical,
                };
                messages.notify(severity, "file search", &err.to_string());
                None
            }
        }
    }

    fn file_search(&self) -> filesearch::Result<ScanOutcome> {
        let folder = self.state.folder.trim();
        if folder.is_empty() {
            return Err(FileSearchError::NoBaseFolder);
        }

        let mut tokens: Vec<&str> = Vec::new();
        let free = self.state.free_text.trim();
        if !free.is_empty() {
            tokens.push(free);
        }
        if self.state.use_refinement {
            let second = self.state.refinement_text.trim();
            if !second.is_empty() {
                tokens.push(second);
            }
        }

        let join = match self.state.join {
            JoinPolicy::And => TokenJoin::All,
            JoinPolicy::Or => TokenJoin::Any,
        };
        let matcher = NameMatcher::new(tokens, join)?;
        let filter = ExtensionFilter::parse(&self.state.extensions);
        scan_folder(Path::new(folder), &matcher, &filter)
    }

    // -----------------------------------------------------------------------
    // Clear
    // -----------------------------------------------------------------------

    /// Clears every search condition and the layer selection. The folder
    /// and extension list are kept.
    pub fn clear(&mut self, messages: &dyn MessageSink) -> Result<()> {
        self.unselect_layer()?;
        self.state.clear_conditions();
        self.store.save(&self.state)?;
        messages.notify(
            Severity::Info,
            "clear",
            "search conditions cleared (layer deselected, folder kept)",
        );
        Ok(())
    }
}
