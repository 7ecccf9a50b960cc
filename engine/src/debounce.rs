//! Single-slot debounce scheduler.
//!
//! The engine performs no I/O and owns no timer. Callers pass their notion of
//! "now" in milliseconds; the scheduler only remembers when the one pending
//! task becomes due. Scheduling again replaces the pending deadline, so at
//! most one task is ever outstanding.

use crate::Timestamp;

/// Default quiescence window for filter recomputation.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// A cancellable, reschedulable deferred task with a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: u64,
    deadline: Option<Timestamp>,
}

impl Debouncer {
    /// Create a scheduler with the given quiescence window in milliseconds.
    pub fn new(window: u64) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Quiescence window in milliseconds.
    pub fn window(&self) -> u64 {
        self.window
    }

    /// (Re)schedule the task to run `window` ms after `now`.
    ///
    /// Any previously pending deadline is dropped.
    pub fn schedule(&mut self, now: Timestamp) -> Timestamp {
        let deadline = now.saturating_add(self.window);
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending task becomes due.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the pending task is due, clearing it.
    pub fn fire_if_due(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_window() {
        let mut debouncer = Debouncer::new(500);
        assert_eq!(debouncer.window(), 500);
        assert_eq!(debouncer.schedule(1000), 1500);

        assert!(!debouncer.fire_if_due(1499));
        assert!(debouncer.fire_if_due(1500));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn fires_only_once() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.window(), DEFAULT_DEBOUNCE_MS);
        debouncer.schedule(0);
        assert!(debouncer.fire_if_due(10_000));
        assert!(!debouncer.fire_if_due(20_000));
    }

    #[test]
    fn reschedule_replaces_pending() {
        let mut debouncer = Debouncer::new(500);
        debouncer.schedule(1000);
        debouncer.schedule(1400);

        // The first deadline no longer counts.
        assert!(!debouncer.fire_if_due(1500));
        assert_eq!(debouncer.deadline(), Some(1900));
        assert!(debouncer.fire_if_due(1900));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut debouncer = Debouncer::new(500);
        debouncer.schedule(0);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
        assert!(!debouncer.fire_if_due(u64::MAX));
    }

    #[test]
    fn zero_window_is_due_immediately() {
        let mut debouncer = Debouncer::new(0);
        debouncer.schedule(42);
        assert!(debouncer.fire_if_due(42));
    }

    #[test]
    fn schedule_saturates() {
        let mut debouncer = Debouncer::new(500);
        assert_eq!(debouncer.schedule(u64::MAX - 1), u64::MAX);
    }
}
