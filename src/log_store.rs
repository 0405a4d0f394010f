use chrono::{DateTime, Local};
use std::collections::VecDeque;

pub const DEFAULT_LOG_CAPACITY: usize = 1000;

pub struct LogStore {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

pub struct LogEntry {
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn display(&self) -> String {
        format!("{} {}", self.timestamp.format("[%H:%M:%S]"), self.text)
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LogStore {
    /// Capacity is clamped to 1 so a `clear` followed by its notice always leaves one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
        }
    }

    pub fn append(&mut self, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text: text.into(),
            timestamp: Local::now(),
        });
    }

    pub fn all(&self) -> impl ExactSizeIterator<Item = &LogEntry> + DoubleEndedIterator {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
