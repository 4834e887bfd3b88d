//! Frontend module for the egui UI
//!
//! This module provides the panel UI using eframe/egui. It drains scan
//! events from the backend thread each frame, applies them to the browser
//! state, and renders whichever presentation state that derives to:
//! not-yet-scanned, scanning, failed, empty result, or the populated list
//! with its filter bar.
//!
//! # Main Types
//!
//! - [`VarLensApp`] - Main application state implementing [`eframe::App`]
//! - [`VariableBrowserState`] - The authoritative browser model (in [`browser`])
//!
//! # Submodules
//!
//! - [`browser`] - Record list, filters, derived views
//! - `row` - Per-record list row rendering

pub mod browser;
mod row;

pub use browser::{BrowserPhase, VariableBrowserState, SCAN_TIMEOUT};

use crate::backend::{ScanEvent, ScannerHandle};
use crate::config::AppState;
use crate::types::VariableKind;
use egui::{Color32, Ui};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Main application state for the variable browser panel
pub struct VarLensApp {
    /// Handle to the scanner backend thread
    scanner: ScannerHandle,

    /// Persistent application state (recent documents, preferences)
    app_state: AppState,

    /// The browser model everything on screen derives from
    browser: VariableBrowserState,

    /// Path of the currently open document, if any
    document_path: Option<PathBuf>,
    /// Name reported by the backend for the open document
    document_name: Option<String>,

    /// Error to show in the status line (document open failures etc.)
    last_error: Option<String>,
}

impl VarLensApp {
    /// Create the application, optionally restoring the last session's document
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        scanner: ScannerHandle,
        app_state: AppState,
        document_path: Option<PathBuf>,
    ) -> Self {
        if app_state.ui_preferences.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        if let Some(path) = &document_path {
            scanner.open_document(path.clone());
        }

        Self {
            scanner,
            app_state,
            browser: VariableBrowserState::new(),
            document_path,
            document_name: None,
            last_error: None,
        }
    }

    /// Open a document and make it the scan target
    fn open_document(&mut self, path: PathBuf) {
        tracing::info!("Opening document {:?}", path);
        self.scanner.open_document(path.clone());
        self.document_path = Some(path);
        self.document_name = None;
        self.browser = VariableBrowserState::new();
        self.last_error = None;
    }

    /// Start a scan cycle: clear the model, then fire the request
    fn find_variables(&mut self) {
        self.browser.request_scan();
        self.scanner.find_variables();
    }

    /// Apply all pending backend events to the model
    fn drain_events(&mut self) {
        for event in self.scanner.drain() {
            match event {
                ScanEvent::DocumentOpened {
                    name,
                    variable_count,
                } => {
                    tracing::info!(
                        "Document {:?} opened with {} variable definitions",
                        name,
                        variable_count
                    );
                    if let Some(path) = &self.document_path {
                        self.app_state.add_recent_document(path, &name);
                        if let Err(e) = self.app_state.save() {
                            tracing::warn!("Failed to save app state: {}", e);
                        }
                    }
                    self.document_name = Some(name);
                    self.last_error = None;
                }
                ScanEvent::VariablesImported(records) => {
                    self.browser.receive_batch(records);
                }
                ScanEvent::ScanFailed(message) => {
                    tracing::warn!("Scan failed: {}", message);
                    if self.browser.phase() == BrowserPhase::Scanning {
                        self.browser.fail(message);
                    } else {
                        self.last_error = Some(message);
                    }
                }
                ScanEvent::Shutdown => {}
            }
        }
    }

    /// Document row: current file name plus the Browse button
    fn render_document_bar(&mut self, ui: &mut Ui) {
        let mut picked: Option<PathBuf> = None;

        ui.horizontal(|ui| {
            ui.label("Document:");
            match (&self.document_name, &self.document_path) {
                (Some(name), Some(path)) => {
                    ui.label(name).on_hover_text(path.display().to_string());
                }
                (None, Some(path)) => {
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "Unknown".to_string());
                    ui.label(filename);
                }
                _ => {
                    ui.label("(none)");
                }
            }
            if ui.button("Browse...").clicked() {
                picked = rfd::FileDialog::new()
                    .add_filter("Design document", &["json"])
                    .pick_file();
            }
        });

        if let Some(error) = &self.last_error {
            ui.colored_label(Color32::LIGHT_RED, error);
        }

        if let Some(path) = picked {
            self.open_document(path);
        }
    }

    /// Centered prompt shown before the first scan
    fn render_initial_state(&mut self, ui: &mut Ui) {
        let mut do_scan = false;
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label("Scan your document to find which variables are being used by different layers.");
            ui.add_space(8.0);
            if ui.button("Find Variables").clicked() {
                do_scan = true;
            }
        });
        if do_scan {
            self.find_variables();
        }
    }

    fn render_scanning_state(&self, ui: &mut Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label("Scanning...");
        });
        // Keep the frame loop alive while we wait on the backend
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn render_failed_state(&mut self, ui: &mut Ui) {
        let mut do_scan = false;
        let message = self
            .browser
            .error()
            .unwrap_or("Scan failed")
            .to_string();
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.colored_label(Color32::LIGHT_RED, message);
            ui.add_space(8.0);
            if ui.button("Try Again").clicked() {
                do_scan = true;
            }
        });
        if do_scan {
            self.find_variables();
        }
    }

    fn render_empty_state(&mut self, ui: &mut Ui) {
        let mut do_scan = false;
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(
                "Hmm, we couldn't find any variables being used in this document. \
                 Open another document and try again.",
            );
            ui.add_space(8.0);
            if ui.button("Find Variables").clicked() {
                do_scan = true;
            }
        });
        if do_scan {
            self.find_variables();
        }
    }

    /// The populated list: filter bar, count, header, rows, refresh
    fn render_populated_state(&mut self, ui: &mut Ui) {
        let mut do_scan = false;

        ui.horizontal(|ui| {
            let kind_label = self
                .browser
                .kind_filter
                .map(|k| k.to_string())
                .unwrap_or_else(|| "All".to_string());
            egui::ComboBox::from_id_salt("kind_filter")
                .selected_text(kind_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.browser.kind_filter, None, "All");
                    for kind in VariableKind::all() {
                        ui.selectable_value(
                            &mut self.browser.kind_filter,
                            Some(*kind),
                            kind.to_string(),
                        );
                    }
                });

            let collections = self.browser.collections();
            let collection_label = self
                .browser
                .collection_filter
                .as_ref()
                .and_then(|id| {
                    collections
                        .iter()
                        .find(|c| &c.id == id)
                        .map(|c| c.display_name.clone())
                })
                .unwrap_or_else(|| "All collections".to_string());
            egui::ComboBox::from_id_salt("collection_filter")
                .selected_text(collection_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.browser.collection_filter,
                        None,
                        "All collections",
                    );
                    for entry in &collections {
                        ui.selectable_value(
                            &mut self.browser.collection_filter,
                            Some(entry.id.clone()),
                            &entry.display_name,
                        );
                    }
                });

            ui.add(
                egui::TextEdit::singleline(&mut self.browser.search)
                    .hint_text("Search")
                    .desired_width(140.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Refresh").on_hover_text("Scan again").clicked() {
                    do_scan = true;
                }
            });
        });

        ui.heading(format!("Found {} variables", self.browser.filtered().len()));
        ui.separator();

        ui.horizontal(|ui| {
            ui.scope(|ui| {
                ui.set_width(220.0);
                ui.label(egui::RichText::new("Variable").strong());
            });
            ui.label(egui::RichText::new("Value").strong());
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.browser.filtered().is_empty() {
                    ui.colored_label(Color32::GRAY, "No matching variables");
                } else {
                    for record in self.browser.filtered() {
                        row::render(ui, record);
                        ui.separator();
                    }
                }
            });

        if do_scan {
            self.find_variables();
        }
    }
}

impl eframe::App for VarLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.browser.check_timeout(Instant::now());

        egui::TopBottomPanel::top("document_bar").show(ctx, |ui| {
            self.render_document_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.browser.phase() {
            BrowserPhase::NotScanned => self.render_initial_state(ui),
            BrowserPhase::Scanning => self.render_scanning_state(ui, ctx),
            BrowserPhase::Failed => self.render_failed_state(ui),
            BrowserPhase::Empty => self.render_empty_state(ui),
            BrowserPhase::Populated => self.render_populated_state(ui),
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state on exit: {}", e);
        }
        self.scanner.shutdown();
    }
}
