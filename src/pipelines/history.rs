use serde::{Deserialize, Serialize};

use super::sentiment_analysis::Label;

/// One analyzed sentence kept in a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub segment_text: String,
    pub label: Label,
    pub confidence: f32,
    pub sequence_number: u64,
}

/// Append-only log of analyzed sentences for one session.
///
/// Entries are never removed or mutated; the only way to shrink the log is to
/// drop the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<SentimentRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next appended record will receive.
    pub fn next_sequence_number(&self) -> u64 {
        self.records.last().map_or(1, |r| r.sequence_number + 1)
    }

    /// Append a record for `text` unless its trimmed form is empty.
    ///
    /// The stored text is trimmed. Returns whether a record was written.
    pub fn append(&mut self, text: &str, label: Label, confidence: f32) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let record = SentimentRecord {
            segment_text: trimmed.to_string(),
            label,
            confidence,
            sequence_number: self.next_sequence_number(),
        };
        self.records.push(record);
        true
    }

    pub fn snapshot(&self) -> &[SentimentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
