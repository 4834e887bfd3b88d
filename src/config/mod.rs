//! Configuration module for varlens
//!
//! This module handles persistent application state: the recently opened
//! documents list, the last session's document, and UI preferences.
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.varlens.varlens/`
//! - **macOS**: `~/Library/Application Support/dev.varlens.varlens/`
//! - **Windows**: `%APPDATA%\dev.varlens.varlens\`
//!
//! # Files
//!
//! - `app_state.json` - Recent documents list and last session info

use crate::error::{Result, VarLensError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.varlens.varlens";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Maximum number of recent documents to remember
pub const MAX_RECENT_DOCUMENTS: usize = 10;

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        VarLensError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            VarLensError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Information about a recently opened document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentDocument {
    /// Path to the document file
    pub path: PathBuf,

    /// Document name (from the document itself)
    pub name: String,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: u64,
}

impl RecentDocument {
    /// Create a new recent document entry
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            path: path.into(),
            name: name.into(),
            last_opened: now,
        }
    }

    /// Check if the document file still exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Use the dark visual theme
    pub dark_mode: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Persistent application state
///
/// Stores user preferences and history that persist across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently opened documents
    #[serde(default)]
    pub recent_documents: Vec<RecentDocument>,

    /// Path to the last opened document (for "restore session" functionality)
    #[serde(default)]
    pub last_document_path: Option<PathBuf>,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_documents: Vec::new(),
            last_document_path: None,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            VarLensError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| VarLensError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| VarLensError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let path = dir.join(APP_STATE_FILE);

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| VarLensError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(&path, content)
            .map_err(|e| VarLensError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or update a recent document
    pub fn add_recent_document(&mut self, path: impl AsRef<Path>, name: &str) {
        let path = path.as_ref().to_path_buf();

        // Remove existing entry for this path
        self.recent_documents.retain(|d| d.path != path);

        self.recent_documents
            .insert(0, RecentDocument::new(path.clone(), name));
        self.recent_documents.truncate(MAX_RECENT_DOCUMENTS);

        self.last_document_path = Some(path);
    }

    /// Remove a document from recents (e.g., if the file was deleted)
    pub fn remove_recent_document(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_documents.retain(|d| d.path != path);
        if self.last_document_path.as_deref() == Some(path) {
            self.last_document_path = None;
        }
    }

    /// Drop recents whose files no longer exist
    pub fn cleanup_missing_documents(&mut self) {
        self.recent_documents.retain(|d| d.exists());
        if let Some(last) = &self.last_document_path {
            if !last.exists() {
                self.last_document_path = None;
            }
        }
    }

    /// Get the last opened document path, if any
    pub fn get_last_document(&self) -> Option<&Path> {
        self.last_document_path.as_deref()
    }
}
