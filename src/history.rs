use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded, most-recent-first log of human readable events.
///
/// ```
/// use cribbage_rs::history::History;
///
/// let mut log = History::new(2);
/// log.push("one");
/// log.push("two");
/// log.push("three");
/// assert_eq!(log.entries().collect::<Vec<_>>(), vec!["three", "two"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    capacity: usize,
    entries: VecDeque<String>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry.into());
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_entries() {
        let mut h = History::new(3);
        for i in 0..5 {
            h.push(format!("e{i}"));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.entries().collect::<Vec<_>>(), vec!["e4", "e3", "e2"]);
        assert_eq!(h.latest(), Some("e4"));
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut h = History::new(0);
        h.push("dropped");
        assert!(h.is_empty());
    }
}
