//! Dialog state carried across sessions.

use serde::{Deserialize, Serialize};

use crate::expression::{Comparator, JoinPolicy, MatchMode};

/// Which shape the refinement condition takes when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementScope {
    /// Typed comparison against the chosen field.
    #[default]
    NamedField,
    /// Match-mode comparison ORed across every string field.
    AllStringFields,
}

/// Stock extension list offered on first run.
pub const DEFAULT_EXTENSIONS: &str =
    "pdf, png, jpg, jpeg, tif, tiff, xlsx, xls, docx, doc, pptx, ppt";

/// Every persisted dialog field. Plain data; the host UI mirrors it into
/// widgets and calls [`crate::settings::SettingsStore::save`] after each
/// accepted change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogState {
    pub free_text: String,
    pub advanced_expanded: bool,
    pub join: JoinPolicy,
    pub use_refinement: bool,
    pub scope: RefinementScope,
    pub field_name: String,
    pub comparator: Comparator,
    pub match_mode: MatchMode,
    pub refinement_text: String,
    pub folder: String,
    pub extensions: String,
    pub layer_name: String,
}

impl Default for DialogState {
    fn default() -> Self {
        Self {
            free_text: String::new(),
            advanced_expanded: false,
            join: JoinPolicy::And,
            use_refinement: false,
            scope: RefinementScope::NamedField,
            field_name: String::new(),
            comparator: Comparator::Equals,
            match_mode: MatchMode::Contains,
            refinement_text: String::new(),
            folder: String::new(),
            extensions: DEFAULT_EXTENSIONS.to_string(),
            layer_name: String::new(),
        }
    }
}

impl DialogState {
    /// Resets every search condition. The folder and extension list are
    /// kept on purpose: clearing conditions must not lose the user's
    /// search folder.
    pub fn clear_conditions(&mut self) {
        self.free_text.clear();
        self.advanced_expanded = false;
        self.join = JoinPolicy::And;
        self.use_refinement = false;
        self.scope = RefinementScope::NamedField;
        self.comparator = Comparator::Equals;
        self.match_mode = MatchMode::Contains;
        self.refinement_text.clear();
        self.layer_name.clear();
    }

    /// Applies the startup policy after a restore: the advanced section
    /// always opens collapsed with the refinement checkbox off, whatever
    /// was saved.
    pub fn restored(mut self) -> Self {
        self.advanced_expanded = false;
        self.use_refinement = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
