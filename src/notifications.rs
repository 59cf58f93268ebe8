//! Notification feed
//!
//! Unbounded producers, bounded display: only the most recent entries are kept.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of notifications to keep
pub const MAX_NOTIFICATIONS: usize = 5;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// A single feed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Unix timestamp (ms) when created
    pub timestamp: f64,
}

impl Notification {
    /// Age label shown next to the message, e.g. `"12s ago"`
    pub fn age_label(&self, now: f64) -> String {
        let secs = ((now - self.timestamp) / 1000.0).floor().max(0.0) as u64;
        format!("{}s ago", secs)
    }
}

/// Newest-first feed holding at most [`MAX_NOTIFICATIONS`] entries
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_NOTIFICATIONS + 1),
            next_id: 1,
        }
    }

    /// Add a notification at the front, evicting the oldest past the cap.
    /// Returns the new entry's id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, timestamp: f64) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        self.entries.push_front(Notification {
            id,
            message: message.into(),
            severity,
            timestamp,
        });
        self.entries.truncate(MAX_NOTIFICATIONS);
        id
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_newest_first() {
        let mut feed = NotificationFeed::new();
        feed.push("first", Severity::Info, 1.0);
        feed.push("second", Severity::Success, 2.0);
        let messages: Vec<_> = feed.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(feed.latest().unwrap().severity, Severity::Success);
    }

    #[test]
    fn test_ids_are_unique_within_one_millisecond() {
        let mut feed = NotificationFeed::new();
        let a = feed.push("a", Severity::Info, 1000.0);
        let b = feed.push("b", Severity::Info, 1000.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_age_label() {
        let n = Notification {
            id: 1,
            message: "x".into(),
            severity: Severity::Info,
            timestamp: 10_000.0,
        };
        assert_eq!(n.age_label(10_000.0), "0s ago");
        assert_eq!(n.age_label(22_999.0), "12s ago");
        // Clock skew never shows negative ages
        assert_eq!(n.age_label(5_000.0), "0s ago");
    }

    proptest! {
        #[test]
        fn prop_keeps_most_recent_five(count in 0usize..40) {
            let mut feed = NotificationFeed::new();
            for i in 0..count {
                feed.push(format!("event {i}"), Severity::Info, i as f64);
            }
            prop_assert_eq!(feed.len(), count.min(MAX_NOTIFICATIONS));
            let expected: Vec<String> = (0..count)
                .rev()
                .take(MAX_NOTIFICATIONS)
                .map(|i| format!("event {i}"))
                .collect();
            let actual: Vec<String> = feed.iter().map(|n| n.message.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
