//! varlens - Main Entry Point
//!
//! Desktop panel for browsing variable usage in a design document.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use varlens::{backend::ScannerBackend, config::AppState, frontend::VarLensApp};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,varlens=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting varlens");

    // Load application state (recent documents, preferences)
    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_documents();

    let document_path = app_state.get_last_document().map(|p| p.to_path_buf());
    if let Some(path) = &document_path {
        tracing::info!("Restoring last session document {:?}", path);
    }

    // Spawn the scanner backend thread
    let (backend, handle) = ScannerBackend::new();
    let backend_handle = std::thread::spawn(move || backend.run());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("varlens"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "varlens",
        native_options,
        Box::new(|cc| Ok(Box::new(VarLensApp::new(cc, handle, app_state, document_path)))),
    );

    tracing::info!("Shutting down...");
    let _ = backend_handle.join();

    result
}
