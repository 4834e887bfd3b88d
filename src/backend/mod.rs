//! Backend module for document scanning
//!
//! This module performs document parsing and variable extraction in a
//! separate thread to keep the UI responsive. It uses crossbeam channels
//! for thread-safe communication with the frontend.
//!
//! # Architecture
//!
//! The backend runs in a separate thread from the UI, communicating via a
//! closed set of tagged message variants:
//!
//! - [`ScanCommand`] - Messages sent from UI to backend (open document, find variables)
//! - [`ScanEvent`] - Messages sent from backend to UI (results, errors)
//! - [`ScannerHandle`] - UI-side handle for sending commands and receiving events
//! - [`ScannerBackend`] - Backend entry point that owns the worker loop
//!
//! The "find variables" request is fire-and-forget: the handle returns
//! immediately and the result arrives later as zero or more
//! [`ScanEvent::VariablesImported`] events. There is no correlation id; at
//! most one scan is logically in flight, and a new request supersedes the
//! previous cycle on the UI side.
//!
//! # Example
//!
//! ```ignore
//! use varlens::backend::{ScanEvent, ScannerBackend};
//!
//! let (backend, handle) = ScannerBackend::new();
//! std::thread::spawn(move || backend.run());
//!
//! handle.open_document("tokens.json".into());
//! handle.find_variables();
//!
//! for event in handle.drain() {
//!     if let ScanEvent::VariablesImported(records) = event {
//!         // append to the browser state
//!     }
//! }
//! ```

pub mod document;
pub mod worker;

pub use document::{CollectionDef, DesignDocument, DocumentNode, VariableDef};
pub use worker::{ScannerWorker, SCAN_BATCH_SIZE};

use crate::types::VariableRecord;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;

/// Message sent from the UI to the scanner backend
#[derive(Debug, Clone)]
pub enum ScanCommand {
    /// Parse a document file and make it the scan target
    OpenDocument(PathBuf),
    /// Scan the open document for variable usage (fire-and-forget)
    FindVariables,
    /// Shutdown the backend
    Shutdown,
}

/// Message sent from the scanner backend to the UI
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A document was parsed and is ready to scan
    DocumentOpened {
        /// Document name from the file
        name: String,
        /// Number of variable definitions in the document
        variable_count: usize,
    },
    /// A batch of discovered variable records
    ///
    /// Delivered zero or more times per scan cycle; batches accumulate on
    /// the UI side. An empty batch means the scan completed with no results.
    VariablesImported(Vec<VariableRecord>),
    /// The scan or document open failed
    ScanFailed(String),
    /// Backend is shutting down
    Shutdown,
}

/// Frontend handle for the scanner backend
pub struct ScannerHandle {
    /// Receiver for scan events
    pub receiver: Receiver<ScanEvent>,
    /// Sender for commands to the backend
    pub command_sender: Sender<ScanCommand>,
}

impl ScannerHandle {
    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<ScanEvent> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending events
    pub fn drain(&self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Send a command to the backend
    pub fn send_command(&self, cmd: ScanCommand) -> bool {
        self.command_sender.send(cmd).is_ok()
    }

    /// Request that a document be opened
    pub fn open_document(&self, path: PathBuf) {
        let _ = self.command_sender.send(ScanCommand::OpenDocument(path));
    }

    /// Request a variable scan of the open document
    pub fn find_variables(&self) {
        let _ = self.command_sender.send(ScanCommand::FindVariables);
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        let _ = self.command_sender.send(ScanCommand::Shutdown);
    }
}

/// The scanner backend that runs in a separate thread
pub struct ScannerBackend {
    /// Receiver for commands from the UI
    command_receiver: Receiver<ScanCommand>,
    /// Sender for events to the UI
    event_sender: Sender<ScanEvent>,
}

impl ScannerBackend {
    /// Create a new scanner backend with communication channels
    pub fn new() -> (Self, ScannerHandle) {
        let (cmd_tx, cmd_rx) = bounded(64);
        // Bounded event channel; a scan of a large document delivers many
        // batches but the UI drains every frame
        let (event_tx, event_rx) = bounded(1024);

        let backend = Self {
            command_receiver: cmd_rx,
            event_sender: event_tx,
        };

        let handle = ScannerHandle {
            receiver: event_rx,
            command_sender: cmd_tx,
        };

        (backend, handle)
    }

    /// Run the backend loop until shutdown
    pub fn run(self) {
        let mut worker = ScannerWorker::new(self.command_receiver, self.event_sender);
        worker.run();
    }
}
