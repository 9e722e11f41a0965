//! Bounded, timestamped activity log shown to players.

use std::collections::VecDeque;

use serde::Serialize;

/// Append-only log keeping the most recent `capacity` entries.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `[HH:MM:SS] message`, evicting the oldest entries past capacity.
    pub fn push(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.entries.push_back(format!("[{}] {}", timestamp, message));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
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

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_timestamp(entry: &str) -> &str {
        // "[HH:MM:SS] " is 11 bytes
        &entry[11..]
    }

    #[test]
    fn test_entries_are_timestamped() {
        let mut log = ActivityLog::new(5);
        log.push("hello");

        let entry = log.entries().next().unwrap();
        assert!(entry.starts_with('['));
        assert_eq!(&entry[9..11], "] ");
        assert_eq!(strip_timestamp(entry), "hello");
    }

    #[test]
    fn test_evicts_oldest() {
        let mut log = ActivityLog::new(3);
        for i in 1..=4 {
            log.push(&format!("entry {}", i));
        }

        let kept: Vec<_> = log.entries().map(strip_timestamp).collect();
        assert_eq!(kept, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = ActivityLog::new(10);
        for i in 1..=4 {
            log.push(&format!("entry {}", i));
        }

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(strip_timestamp(&recent[0]), "entry 4");
        assert_eq!(strip_timestamp(&recent[1]), "entry 3");
        assert_eq!(log.recent(50).len(), 4);
    }
}
