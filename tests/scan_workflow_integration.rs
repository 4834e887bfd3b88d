//! Integration tests for the scan workflow
//!
//! These tests validate the full request/response cycle through the backend
//! thread: opening a document file, firing a scan, and folding the delivered
//! events into the browser state.

mod common;

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use varlens::backend::{ScanEvent, ScannerBackend, ScannerHandle, SCAN_BATCH_SIZE};
use varlens::frontend::{BrowserPhase, VariableBrowserState};
use varlens::types::VariableKind;

const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// Write a document JSON file with `count` variables, all bound by one node
fn write_document(count: usize) -> NamedTempFile {
    let variables: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id":"var:{i}","name":"Token/{i}","kind":"number","collectionId":"col:1","value":{i}}}"#
            )
        })
        .collect();
    let bound: Vec<String> = (0..count).map(|i| format!("\"var:{}\"", i)).collect();
    let json = format!(
        r#"{{
            "name": "Fixture",
            "collections": [{{"id": "col:1", "name": "Tokens"}}],
            "variables": [{}],
            "nodes": [{{"id": "root", "bound": [{}]}}]
        }}"#,
        variables.join(","),
        bound.join(",")
    );

    let mut file = NamedTempFile::new().expect("create temp document");
    file.write_all(json.as_bytes()).expect("write temp document");
    file
}

fn recv(handle: &ScannerHandle) -> ScanEvent {
    handle
        .receiver
        .recv_timeout(EVENT_TIMEOUT)
        .expect("backend event within timeout")
}

#[test]
fn test_open_then_scan_populates_browser() {
    let file = write_document(3);
    let (backend, handle) = ScannerBackend::new();
    let backend_thread = std::thread::spawn(move || backend.run());

    handle.open_document(file.path().to_path_buf());
    match recv(&handle) {
        ScanEvent::DocumentOpened {
            name,
            variable_count,
        } => {
            assert_eq!(name, "Fixture");
            assert_eq!(variable_count, 3);
        }
        other => panic!("Unexpected event: {:?}", other),
    }

    let mut browser = VariableBrowserState::new();
    browser.request_scan();
    handle.find_variables();

    match recv(&handle) {
        ScanEvent::VariablesImported(records) => browser.receive_batch(records),
        other => panic!("Unexpected event: {:?}", other),
    }

    assert_eq!(browser.phase(), BrowserPhase::Populated);
    assert_eq!(browser.records().len(), 3);
    assert_eq!(browser.records()[0].name, "Token/0");
    assert_eq!(browser.records()[0].kind, VariableKind::Number);
    assert_eq!(
        browser.records()[0].collection_name.as_deref(),
        Some("Tokens")
    );

    handle.shutdown();
    backend_thread.join().unwrap();
}

#[test]
fn test_large_scan_arrives_in_multiple_batches() {
    let count = SCAN_BATCH_SIZE * 2 + 5;
    let file = write_document(count);
    let (backend, handle) = ScannerBackend::new();
    let backend_thread = std::thread::spawn(move || backend.run());

    handle.open_document(file.path().to_path_buf());
    assert!(matches!(recv(&handle), ScanEvent::DocumentOpened { .. }));

    let mut browser = VariableBrowserState::new();
    browser.request_scan();
    handle.find_variables();

    let mut batches = 0;
    while browser.records().len() < count {
        match recv(&handle) {
            ScanEvent::VariablesImported(records) => {
                browser.receive_batch(records);
                batches += 1;
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    assert_eq!(batches, 3);
    assert_eq!(browser.records().len(), count);
    // Insertion order survives batching
    assert_eq!(browser.records()[0].name, "Token/0");
    assert_eq!(browser.records()[count - 1].name, format!("Token/{}", count - 1));

    handle.shutdown();
    backend_thread.join().unwrap();
}

#[test]
fn test_scan_without_document_reports_failure() {
    let (backend, handle) = ScannerBackend::new();
    let backend_thread = std::thread::spawn(move || backend.run());

    let mut browser = VariableBrowserState::new();
    browser.request_scan();
    handle.find_variables();

    match recv(&handle) {
        ScanEvent::ScanFailed(message) => browser.fail(message),
        other => panic!("Unexpected event: {:?}", other),
    }
    assert_eq!(browser.phase(), BrowserPhase::Failed);

    handle.shutdown();
    backend_thread.join().unwrap();
}

#[test]
fn test_malformed_document_reports_failure() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let (backend, handle) = ScannerBackend::new();
    let backend_thread = std::thread::spawn(move || backend.run());

    handle.open_document(file.path().to_path_buf());
    match recv(&handle) {
        ScanEvent::ScanFailed(message) => {
            assert!(message.contains("Failed to parse"));
        }
        other => panic!("Unexpected event: {:?}", other),
    }

    handle.shutdown();
    backend_thread.join().unwrap();
}

#[test]
fn test_rescan_after_document_swap() {
    let first = write_document(2);
    let second = write_document(4);
    let (backend, handle) = ScannerBackend::new();
    let backend_thread = std::thread::spawn(move || backend.run());

    let mut browser = VariableBrowserState::new();

    handle.open_document(first.path().to_path_buf());
    assert!(matches!(recv(&handle), ScanEvent::DocumentOpened { .. }));
    browser.request_scan();
    handle.find_variables();
    match recv(&handle) {
        ScanEvent::VariablesImported(records) => browser.receive_batch(records),
        other => panic!("Unexpected event: {:?}", other),
    }
    assert_eq!(browser.records().len(), 2);

    // New document, new cycle: the old records are gone before the result lands
    handle.open_document(second.path().to_path_buf());
    assert!(matches!(recv(&handle), ScanEvent::DocumentOpened { .. }));
    browser.request_scan();
    assert!(browser.records().is_empty());
    handle.find_variables();
    match recv(&handle) {
        ScanEvent::VariablesImported(records) => browser.receive_batch(records),
        other => panic!("Unexpected event: {:?}", other),
    }
    assert_eq!(browser.records().len(), 4);

    handle.shutdown();
    backend_thread.join().unwrap();
}
