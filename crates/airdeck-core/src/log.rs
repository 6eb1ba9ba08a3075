// ── Dashboard event log ──

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Maximum number of entries retained.
pub const LOG_CAPACITY: usize = 100;

/// Number of entries shown in the log panel.
pub const VISIBLE_ENTRIES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    /// Wall-clock time of the entry, `HH:MM:SS`.
    pub fn stamp(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Bounded, append-only log of dashboard events. Oldest entries fall off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: DateTime<Local>, message: impl Into<String>) {
        self.entries.push_back(LogEntry {
            at,
            message: message.into(),
        });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    /// The entries the log panel renders.
    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> {
        self.tail(VISIBLE_ENTRIES)
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
