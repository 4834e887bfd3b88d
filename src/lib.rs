//! # varlens: design-document variable usage browser
//!
//! A desktop panel that scans a design-document file for variable usage
//! (colors, numbers, strings, booleans) and lets the user browse, filter,
//! and search the results.
//!
//! ## Architecture
//!
//! - **Backend**: Parses the document and extracts used variables in a
//!   separate thread
//! - **Frontend**: Renders the panel with eframe/egui; everything on screen
//!   derives from a single browser state model
//! - **Communication**: Crossbeam channels carrying a closed set of tagged
//!   message variants ([`ScanCommand`] / [`ScanEvent`])
//!
//! The scan request is fire-and-forget: the UI clears its model, sends
//! `FindVariables`, and the result arrives later as zero or more
//! `VariablesImported` batches that accumulate in insertion order.
//!
//! ## Configuration
//!
//! Application state (recent documents, preferences) is stored in the
//! platform-appropriate data directory under `dev.varlens.varlens`:
//!
//! - **Linux**: `~/.local/share/dev.varlens.varlens/`
//! - **macOS**: `~/Library/Application Support/dev.varlens.varlens/`
//! - **Windows**: `%APPDATA%\dev.varlens.varlens\`
//!
//! ## Example
//!
//! ```ignore
//! use varlens::{backend::ScannerBackend, config::AppState, frontend::VarLensApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let app_state = AppState::load_or_default();
//!     let (backend, handle) = ScannerBackend::new();
//!
//!     std::thread::spawn(move || backend.run());
//!
//!     let native_options = eframe::NativeOptions::default();
//!     eframe::run_native(
//!         "varlens",
//!         native_options,
//!         Box::new(|cc| Ok(Box::new(VarLensApp::new(cc, handle, app_state, None)))),
//!     )
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use backend::{DesignDocument, ScanCommand, ScanEvent, ScannerBackend, ScannerHandle};
pub use config::AppState;
pub use error::{Result, VarLensError};
pub use frontend::{BrowserPhase, VarLensApp, VariableBrowserState};
pub use types::{CollectionEntry, VariableKind, VariableRecord, VariableValue};
