use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReportFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHistoryEntry {
    pub id: Uuid,
    pub transformer_id: String,
    pub report_type: String,
    pub format: ReportFormat,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportHistoryEntry {
    /// Heading shown in the history list, e.g. `T001 - Comprehensive Report`.
    pub fn heading(&self) -> String {
        format!("{} - {} Report", self.transformer_id, self.report_type)
    }
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Generated reports, newest first. Holds at most `capacity` entries; the
/// oldest is dropped when a new one arrives at capacity.
#[derive(Debug, Clone)]
pub struct ReportHistory {
    entries: Vec<ReportHistoryEntry>,
    capacity: usize,
}

impl Default for ReportHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ReportHistory {
    /// `capacity` of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, entry: ReportHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[ReportHistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
