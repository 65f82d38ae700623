//! Settings persistence for the dialog state.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Result, SearchError};
use crate::state::DialogState;

/// Key-value persistence for the dialog, scoped to this plugin.
///
/// `save` is idempotent: calling it repeatedly with the same state is a
/// no-op from the user's point of view.
pub trait SettingsStore {
    fn load(&self) -> Result<DialogState>;
    fn save(&self, state: &DialogState) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Non-persistent store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<DialogState>,
}

impl MemoryStore {
    pub fn new(state: DialogState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<DialogState> {
        self.state
            .lock()
            .map(|state| state.clone())
            .map_err(|_| SearchError::Settings("settings state poisoned".to_string()))
    }

    fn save(&self, state: &DialogState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| SearchError::Settings("settings state poisoned".to_string()))?;
        *guard = state.clone();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// JSON file store under the user's config directory.
///
/// A missing file loads the defaults; a file that exists but does not
/// parse is an error rather than a silent reset.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location,
    /// `<config dir>/layerseek/state.json`.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| SearchError::Settings("no user config directory".to_string()))?;
        Ok(Self::new(base.join("layerseek").join("state.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<DialogState> {
        if !self.path.exists() {
            return Ok(DialogState::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw)
            .map_err(|err| SearchError::Settings(format!("{}: {err}", self.path.display())))
    }

    fn save(&self, state: &DialogState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(state)
            .map_err(|err| SearchError::Settings(err.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
