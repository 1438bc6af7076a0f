// ABOUTME: Time-window and tail filtering over decoded log entries.
// ABOUTME: Bounds are inclusive; tail counts from the end of the narrowed window.

use super::entry::LogEntry;
use serde::Deserialize;

/// Filter window applied to a batch of log entries.
///
/// All bounds are optional. `since` and `until` are inclusive epoch seconds.
/// `tail` keeps the last N entries that survive the time bounds; `0` means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LogWindow {
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub tail: Option<u64>,
}

impl LogWindow {
    pub fn new(since: Option<i64>, until: Option<i64>, tail: Option<u64>) -> Self {
        Self { since, until, tail }
    }

    /// Window with only a tail bound.
    pub fn tail(n: u64) -> Self {
        Self {
            tail: Some(n),
            ..Self::default()
        }
    }

    /// Whether the entry falls inside the time bounds.
    pub fn contains(&self, timestamp: i64) -> bool {
        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }

    /// The effective tail limit, if any.
    pub fn tail_limit(&self) -> Option<usize> {
        match self.tail {
            Some(0) | None => None,
            Some(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    /// Narrow `entries` to this window, preserving relative order.
    ///
    /// Time bounds are evaluated per entry and do not assume sorted input.
    /// The tail limit is applied after time narrowing.
    pub fn apply(&self, entries: Vec<LogEntry>) -> Vec<LogEntry> {
        let mut kept: Vec<LogEntry> = entries
            .into_iter()
            .filter(|entry| self.contains(entry.timestamp))
            .collect();

        if let Some(limit) = self.tail_limit()
            && kept.len() > limit
        {
            kept.drain(..kept.len() - limit);
        }

        kept
    }
}
