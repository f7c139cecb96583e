//! Bounded, newest-first log of what the engine did.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of entries kept.
pub const LOG_CAPACITY: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a timestamped entry at the front, evicting the oldest above capacity.
    pub fn push(&mut self, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(LOG_CAPACITY);
        entry
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries oldest first, one per line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .rev()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
