//! Deferred-advance queue with cancel tokens.
//!
//! Scheduling returns a [`TimerToken`]. Tokens are never reused, so once a
//! token has been cancelled or superseded, delivering it again can be
//! recognised as stale by whoever owns the queue.

use std::fmt;
use std::time::Duration;
use tracing::trace;

/// Identity of one scheduled advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    token: TimerToken,
    due: Duration,
}

/// Single-threaded timer queue ordered by deadline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_token: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer that becomes due at `due`
    pub fn schedule(&mut self, due: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);

        // Keep entries sorted by deadline; ties fire in scheduling order.
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, Entry { token, due });

        trace!(%token, due_ms = due.as_millis() as u64, "timer scheduled");
        token
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.entries.iter().position(|e| e.token == token) {
            Some(pos) => {
                self.entries.remove(pos);
                trace!(%token, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every outstanding timer, returning how many there were
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        if cancelled > 0 {
            trace!(cancelled, "all timers cancelled");
        }
        self.entries.clear();
        cancelled
    }

    /// Remove and return the earliest timer whose deadline is `<= now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerToken, Duration)> {
        match self.entries.first() {
            Some(entry) if entry.due <= now => {
                let entry = self.entries.remove(0);
                Some((entry.token, entry.due))
            }
            _ => None,
        }
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.due)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pop_due_respects_deadline_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(ms(300));
        let early = queue.schedule(ms(100));

        assert_eq!(queue.next_deadline(), Some(ms(100)));
        assert_eq!(queue.pop_due(ms(50)), None);
        assert_eq!(queue.pop_due(ms(500)), Some((early, ms(100))));
        assert_eq!(queue.pop_due(ms(500)), Some((late, ms(300))));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(ms(100));
        let second = queue.schedule(ms(100));

        assert_eq!(queue.pop_due(ms(100)).map(|(t, _)| t), Some(first));
        assert_eq!(queue.pop_due(ms(100)).map(|(t, _)| t), Some(second));
    }

    #[test]
    fn test_cancel_removes_only_that_timer() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(ms(100));
        let b = queue.schedule(ms(200));

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a), "second cancel is a no-op");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.deadline(b), Some(ms(200)));
        assert_eq!(queue.deadline(a), None);
    }

    #[test]
    fn test_tokens_are_never_reused() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(ms(10));
        queue.cancel_all();
        let b = queue.schedule(ms(10));
        assert_ne!(a, b);
    }

    #[test]
    fn test_cancel_all_reports_count() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1));
        queue.schedule(ms(2));
        assert_eq!(queue.cancel_all(), 2);
        assert_eq!(queue.cancel_all(), 0);
        assert_eq!(queue.next_deadline(), None);
    }
}
