//! Append-only command log.
//!
//! Newest-first, timestamped record of command lifecycle events. The log
//! is UI-facing and non-authoritative: it mirrors what the worker did,
//! it never drives behavior.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
}

/// Newest-first lifecycle record.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<LogEntry>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry and return a copy for event publication.
    pub fn record(&mut self, severity: Severity, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            timestamp: Local::now(),
            severity,
            message: message.into(),
        };
        self.entries.insert(0, entry.clone());
        entry
    }

    /// Snapshot, newest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
