//! Debounce and dedup gates for the live query's input streams.

use std::time::{Duration, Instant};

/// Holds the latest value until input has been quiet for a fixed period.
///
/// Every push replaces the pending value and restarts the wait.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Queue `value`; returns `true` when it superseded a pending value.
    pub fn push(&mut self, value: T, now: Instant) -> bool {
        self.pending.replace((value, now + self.quiet)).is_some()
    }

    /// When the pending value settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Passes a value through only when it differs from the last one passed.
#[derive(Debug, Clone)]
pub struct Dedup<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> Dedup<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Start with `value` already considered emitted.
    pub fn seeded(value: T) -> Self {
        Self { last: Some(value) }
    }

    /// `Some(value)` when fresh, `None` when structurally equal to the last.
    pub fn offer(&mut self, value: T) -> Option<T> {
        if self.last.as_ref() == Some(&value) {
            return None;
        }
        self.last = Some(value.clone());
        Some(value)
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

impl<T: PartialEq + Clone> Default for Dedup<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(1000);

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("iP", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(999)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some("iP"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_keystroke_restarts_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.push("i", start));
        assert!(debouncer.push("iP", start + Duration::from_millis(600)));

        assert_eq!(debouncer.poll(start + Duration::from_millis(1200)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(1600))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(1600)), Some("iP"));
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));

        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + QUIET * 2), None);
    }

    #[test]
    fn test_dedup() {
        let mut dedup = Dedup::new();
        assert_eq!(dedup.offer("a"), Some("a"));
        assert_eq!(dedup.offer("a"), None);
        assert_eq!(dedup.offer("b"), Some("b"));
        assert_eq!(dedup.offer("a"), Some("a"));
    }

    #[test]
    fn test_seeded_dedup_suppresses_initial_value() {
        let mut dedup = Dedup::seeded(String::new());
        assert_eq!(dedup.offer(String::new()), None);
        assert_eq!(dedup.last(), Some(&String::new()));
    }
}
