//! Variable browser state
//!
//! This is the authoritative model behind the panel: the accumulated list
//! of discovered variable records, the three independent filter criteria,
//! and the derived views the UI renders from.
//!
//! # Derived, never cached
//!
//! [`VariableBrowserState::filtered`] and
//! [`VariableBrowserState::collections`] are recomputed from the current
//! record list on every call, so they cannot drift out of sync with the
//! data they summarize.
//!
//! # Scan cycle
//!
//! A cycle starts with [`request_scan`](VariableBrowserState::request_scan),
//! which clears the list synchronously; results arrive later through
//! [`receive_batch`](VariableBrowserState::receive_batch), possibly in
//! several increments. There is no correlation id: a late batch from a
//! superseded cycle lands in the current one.

use crate::types::{CollectionEntry, VariableKind, VariableRecord};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a scan may stay unanswered before the cycle is marked failed
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// Presentation state of the panel, derived from the browser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserPhase {
    /// Initial state, no scan requested yet
    NotScanned,
    /// Scan requested, no result received yet
    Scanning,
    /// The scan failed or timed out
    Failed,
    /// Scan completed with zero records
    Empty,
    /// Scan completed with at least one record
    Populated,
}

/// State for the variable browser panel
#[derive(Debug, Default)]
pub struct VariableBrowserState {
    /// Accumulated records for the current scan cycle
    records: Vec<VariableRecord>,
    /// Whether a result has arrived for the current cycle
    ready: bool,
    /// Whether a request is outstanding with nothing received yet
    scanning: bool,
    /// Failure message for the current cycle, if any
    error: Option<String>,
    /// When the current cycle's request was issued
    requested_at: Option<Instant>,

    /// Selected kind, `None` for unrestricted
    pub kind_filter: Option<VariableKind>,
    /// Selected collection id, `None` for unrestricted
    pub collection_filter: Option<String>,
    /// Free-text search term; empty or whitespace-only means unrestricted
    pub search: String,
}

impl VariableBrowserState {
    /// Create an empty browser state
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new scan cycle
    ///
    /// Clears the record list and marks the result as not-yet-ready,
    /// synchronously, before any response can arrive. The caller sends the
    /// actual "find variables" command through the scanner handle.
    /// Safe to call repeatedly; each call restarts the cycle.
    pub fn request_scan(&mut self) {
        self.records.clear();
        self.ready = false;
        self.scanning = true;
        self.error = None;
        self.requested_at = Some(Instant::now());
    }

    /// Receive one batch of scan results
    ///
    /// Records accumulate across batches rather than replacing each other;
    /// the host may deliver a cycle's result incrementally. An empty batch
    /// still marks the result ready, which is how "no variables found" is
    /// distinguished from "not yet scanned".
    pub fn receive_batch(&mut self, records: Vec<VariableRecord>) {
        self.records.extend(records);
        self.ready = true;
        self.scanning = false;
        // A result arriving after a timeout still counts
        self.error = None;
    }

    /// Mark the current cycle as failed
    pub fn fail(&mut self, message: impl Into<String>) {
        self.scanning = false;
        self.error = Some(message.into());
    }

    /// Fail the cycle if the request has gone unanswered past [`SCAN_TIMEOUT`]
    ///
    /// Returns true if the timeout fired.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        if !self.scanning {
            return false;
        }
        let Some(requested_at) = self.requested_at else {
            return false;
        };
        if now.duration_since(requested_at) > SCAN_TIMEOUT {
            self.fail("Scan timed out");
            true
        } else {
            false
        }
    }

    /// Set the kind filter; `None` means unrestricted
    pub fn set_kind_filter(&mut self, kind: Option<VariableKind>) {
        self.kind_filter = kind;
    }

    /// Set the collection filter; `None` means unrestricted
    pub fn set_collection_filter(&mut self, collection_id: Option<String>) {
        self.collection_filter = collection_id;
    }

    /// Set the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// The full record list for the current cycle, insertion order
    pub fn records(&self) -> &[VariableRecord] {
        &self.records
    }

    /// Whether a result has arrived for the current cycle
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Failure message for the current cycle, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Derived presentation state
    pub fn phase(&self) -> BrowserPhase {
        if self.error.is_some() {
            BrowserPhase::Failed
        } else if self.scanning {
            BrowserPhase::Scanning
        } else if !self.ready {
            BrowserPhase::NotScanned
        } else if self.records.is_empty() {
            BrowserPhase::Empty
        } else {
            BrowserPhase::Populated
        }
    }

    /// Distinct collections present in the record list, first-seen order
    ///
    /// The display name is the first non-missing `collection_name` seen for
    /// that id; if every record of the collection lacks one, a label is
    /// synthesized from the id.
    pub fn collections(&self) -> Vec<CollectionEntry> {
        let mut entries: Vec<CollectionEntry> = Vec::new();
        let mut index_by_id: HashMap<&str, usize> = HashMap::new();
        let mut named: Vec<bool> = Vec::new();

        for record in &self.records {
            match index_by_id.get(record.collection_id.as_str()) {
                Some(&idx) => {
                    if !named[idx] {
                        if let Some(name) = &record.collection_name {
                            entries[idx].display_name = name.clone();
                            named[idx] = true;
                        }
                    }
                }
                None => {
                    let display_name = record
                        .collection_name
                        .clone()
                        .unwrap_or_else(|| CollectionEntry::fallback_label(&record.collection_id));
                    index_by_id.insert(record.collection_id.as_str(), entries.len());
                    named.push(record.collection_name.is_some());
                    entries.push(CollectionEntry {
                        id: record.collection_id.clone(),
                        display_name,
                    });
                }
            }
        }

        entries
    }

    /// The ordered subsequence of records matching all three filter criteria
    pub fn filtered(&self) -> Vec<&VariableRecord> {
        self.records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Whether a record passes the AND of the three filter predicates
    fn matches(&self, record: &VariableRecord) -> bool {
        if let Some(kind) = self.kind_filter {
            if record.kind != kind {
                return false;
            }
        }

        if let Some(collection_id) = &self.collection_filter {
            if &record.collection_id != collection_id {
                return false;
            }
        }

        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        record
            .name
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariableValue;

    fn record(name: &str, kind: VariableKind, collection_id: &str) -> VariableRecord {
        VariableRecord::new(name, kind, collection_id, VariableValue::Number(0.0))
    }

    #[test]
    fn test_initial_phase_is_not_scanned() {
        let state = VariableBrowserState::new();
        assert_eq!(state.phase(), BrowserPhase::NotScanned);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_request_scan_clears_synchronously() {
        let mut state = VariableBrowserState::new();
        state.receive_batch(vec![record("a", VariableKind::Number, "c1")]);
        assert!(state.is_ready());

        state.request_scan();
        assert!(state.records().is_empty());
        assert!(!state.is_ready());
        assert_eq!(state.phase(), BrowserPhase::Scanning);
    }

    #[test]
    fn test_batches_accumulate_in_order() {
        let mut state = VariableBrowserState::new();
        state.request_scan();
        state.receive_batch(vec![record("a", VariableKind::Number, "c1")]);
        assert!(state.is_ready());
        state.receive_batch(vec![record("b", VariableKind::Color, "c1")]);

        let names: Vec<&str> = state.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_result_distinct_from_not_scanned() {
        let mut state = VariableBrowserState::new();
        state.request_scan();
        state.receive_batch(Vec::new());
        assert!(state.is_ready());
        assert_eq!(state.phase(), BrowserPhase::Empty);
    }

    #[test]
    fn test_timeout_marks_cycle_failed() {
        let mut state = VariableBrowserState::new();
        state.request_scan();

        // Not yet past the deadline
        assert!(!state.check_timeout(Instant::now()));
        assert_eq!(state.phase(), BrowserPhase::Scanning);

        let late = Instant::now() + SCAN_TIMEOUT + Duration::from_secs(1);
        assert!(state.check_timeout(late));
        assert_eq!(state.phase(), BrowserPhase::Failed);
        assert_eq!(state.error(), Some("Scan timed out"));
    }

    #[test]
    fn test_late_batch_recovers_from_timeout() {
        let mut state = VariableBrowserState::new();
        state.request_scan();
        let late = Instant::now() + SCAN_TIMEOUT + Duration::from_secs(1);
        state.check_timeout(late);

        state.receive_batch(vec![record("a", VariableKind::Number, "c1")]);
        assert_eq!(state.phase(), BrowserPhase::Populated);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_timeout_does_not_fire_when_idle() {
        let mut state = VariableBrowserState::new();
        let late = Instant::now() + SCAN_TIMEOUT + Duration::from_secs(60);
        assert!(!state.check_timeout(late));
        assert_eq!(state.phase(), BrowserPhase::NotScanned);
    }

    #[test]
    fn test_collection_display_name_upgrade() {
        // First record of the collection has no name; a later one does
        let mut state = VariableBrowserState::new();
        state.receive_batch(vec![
            record("a", VariableKind::Number, "c1"),
            record("b", VariableKind::Number, "c1").with_collection_name("Brand"),
        ]);

        let collections = state.collections();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].display_name, "Brand");
    }

    #[test]
    fn test_whitespace_search_is_unrestricted() {
        let mut state = VariableBrowserState::new();
        state.receive_batch(vec![record("a", VariableKind::Number, "c1")]);
        state.set_search("   ");
        assert_eq!(state.filtered().len(), 1);
    }
}
