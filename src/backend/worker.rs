//! Scanner worker thread implementation
//!
//! This module contains the worker loop that runs in a separate thread and
//! handles document parsing and variable extraction. It communicates with
//! the UI thread through crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Command processing**: Responds to UI commands (open document, find variables)
//! - **Document parsing**: Loads and caches the scan target
//! - **Incremental delivery**: Sends scan results in fixed-size batches so a
//!   large document starts populating the list before the walk completes
//! - **Error reporting**: A missing or malformed document becomes a
//!   [`ScanEvent::ScanFailed`] rather than a silent no-op

use crate::backend::document::DesignDocument;
use crate::backend::{ScanCommand, ScanEvent};
use crossbeam_channel::{Receiver, Sender};

/// Number of records delivered per `VariablesImported` event
pub const SCAN_BATCH_SIZE: usize = 64;

/// The scanner worker loop
pub struct ScannerWorker {
    /// Receiver for commands from the UI
    command_receiver: Receiver<ScanCommand>,
    /// Sender for events to the UI
    event_sender: Sender<ScanEvent>,
    /// The currently open document, if any
    document: Option<DesignDocument>,
}

impl ScannerWorker {
    /// Create a new worker
    pub fn new(command_receiver: Receiver<ScanCommand>, event_sender: Sender<ScanEvent>) -> Self {
        Self {
            command_receiver,
            event_sender,
            document: None,
        }
    }

    /// Run the worker loop until shutdown or channel disconnect
    pub fn run(&mut self) {
        tracing::info!("Scanner worker started");

        loop {
            match self.command_receiver.recv() {
                Ok(cmd) => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Err(_) => {
                    tracing::debug!("Command channel disconnected, stopping worker");
                    break;
                }
            }
        }

        tracing::info!("Scanner worker stopped");
    }

    /// Process one command; returns false when the worker should stop
    fn handle_command(&mut self, cmd: ScanCommand) -> bool {
        match cmd {
            ScanCommand::OpenDocument(path) => {
                tracing::info!("Opening document {:?}", path);
                match DesignDocument::load(&path) {
                    Ok(doc) => {
                        self.send(ScanEvent::DocumentOpened {
                            name: doc.name.clone(),
                            variable_count: doc.variable_count(),
                        });
                        self.document = Some(doc);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to open document: {}", e);
                        self.send(ScanEvent::ScanFailed(e.to_string()));
                    }
                }
            }
            ScanCommand::FindVariables => self.run_scan(),
            ScanCommand::Shutdown => {
                self.send(ScanEvent::Shutdown);
                return false;
            }
        }
        true
    }

    /// Scan the open document and deliver results in batches
    fn run_scan(&mut self) {
        let Some(doc) = &self.document else {
            self.send(ScanEvent::ScanFailed("No document open".to_string()));
            return;
        };

        let records = doc.scan_used_variables();
        tracing::info!(
            "Scan of {:?} found {} used variables",
            doc.name,
            records.len()
        );

        if records.is_empty() {
            // Empty result still gets one event so the UI can tell
            // "nothing found" apart from "not yet scanned"
            self.send(ScanEvent::VariablesImported(Vec::new()));
            return;
        }

        for batch in records.chunks(SCAN_BATCH_SIZE) {
            self.send(ScanEvent::VariablesImported(batch.to_vec()));
        }
    }

    /// Send an event, logging if the UI side has gone away
    fn send(&self, event: ScanEvent) {
        if self.event_sender.send(event).is_err() {
            tracing::warn!("Event channel disconnected, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::document::{DocumentNode, VariableDef};
    use crate::types::{VariableKind, VariableValue};
    use crossbeam_channel::unbounded;

    fn worker_pair() -> (
        ScannerWorker,
        Sender<ScanCommand>,
        Receiver<ScanEvent>,
    ) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        (ScannerWorker::new(cmd_rx, event_tx), cmd_tx, event_rx)
    }

    fn document_with_variables(count: usize) -> DesignDocument {
        let variables: Vec<VariableDef> = (0..count)
            .map(|i| VariableDef {
                id: format!("var:{}", i),
                name: format!("Variable {}", i),
                kind: VariableKind::Number,
                collection_id: "col:1".to_string(),
                value: VariableValue::Number(i as f64),
            })
            .collect();
        let nodes = vec![DocumentNode {
            id: "root".to_string(),
            name: "Page".to_string(),
            bound: (0..count).map(|i| format!("var:{}", i)).collect(),
            children: Vec::new(),
        }];
        DesignDocument {
            name: "Generated".to_string(),
            collections: Vec::new(),
            variables,
            nodes,
        }
    }

    #[test]
    fn test_scan_without_document_fails() {
        let (mut worker, _cmd_tx, event_rx) = worker_pair();
        worker.handle_command(ScanCommand::FindVariables);

        let event = event_rx.try_recv().unwrap();
        assert!(matches!(event, ScanEvent::ScanFailed(_)));
    }

    #[test]
    fn test_scan_delivers_in_batches() {
        let (mut worker, _cmd_tx, event_rx) = worker_pair();
        worker.document = Some(document_with_variables(SCAN_BATCH_SIZE + 10));
        worker.handle_command(ScanCommand::FindVariables);

        let events: Vec<ScanEvent> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        match (&events[0], &events[1]) {
            (ScanEvent::VariablesImported(a), ScanEvent::VariablesImported(b)) => {
                assert_eq!(a.len(), SCAN_BATCH_SIZE);
                assert_eq!(b.len(), 10);
            }
            other => panic!("Unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_scan_of_empty_document_sends_empty_batch() {
        let (mut worker, _cmd_tx, event_rx) = worker_pair();
        worker.document = Some(document_with_variables(0));
        worker.handle_command(ScanCommand::FindVariables);

        let event = event_rx.try_recv().unwrap();
        match event {
            ScanEvent::VariablesImported(records) => assert!(records.is_empty()),
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_shutdown_stops_worker() {
        let (mut worker, _cmd_tx, event_rx) = worker_pair();
        assert!(!worker.handle_command(ScanCommand::Shutdown));
        assert!(matches!(event_rx.try_recv(), Ok(ScanEvent::Shutdown)));
    }
}
