//! Session history of produced summaries.
//!
//! In-memory only: the ledger lives as long as the workspace and is dropped
//! with it. Entries are never edited or removed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One produced summary.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Opaque unique id.
    pub id: String,
    /// The summary text as returned by the service.
    pub text: String,
    /// When the summary was produced.
    pub timestamp: DateTime<Utc>,
}

/// Newest-first log of successful summaries.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a summary, stamping an id and the current instant.
    ///
    /// Identical text appended twice yields two distinct entries.
    pub fn append(&mut self, text: &str) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Entries in newest-first order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_prepends_newest_first() {
        let mut ledger = HistoryLedger::new();
        ledger.append("first");
        ledger.append("second");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].text, "second");
        assert_eq!(ledger.entries()[1].text, "first");
    }

    #[test]
    fn duplicate_text_yields_distinct_entries() {
        let mut ledger = HistoryLedger::new();
        let first_id = ledger.append("same summary").id.clone();
        let second_id = ledger.append("same summary").id.clone();

        assert_eq!(ledger.len(), 2);
        assert_ne!(first_id, second_id);
    }

    #[test]
    fn starts_empty() {
        let ledger = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.entries().is_empty());
    }
}
