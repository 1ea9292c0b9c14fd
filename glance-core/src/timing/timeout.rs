//! Cancellable glance timeout
//!
//! A one-shot timer armed when a glance starts. At most one is pending at
//! any time; arming again cancels the previous one first so a stale timeout
//! can never fire into a newer glance.

use crate::traits::{TimerHandle, TimerKind, TimerService};

/// Glance timeout state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlanceTimeout {
    /// Timeout duration (0 = disabled)
    timeout_ms: u32,
    /// Currently scheduled timer
    pending: Option<TimerHandle>,
}

impl GlanceTimeout {
    /// Create a timeout; `timeout_ms == 0` disables it
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.timeout_ms > 0
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule the timeout, replacing any pending one
    ///
    /// Does nothing when disabled.
    pub fn arm<T: TimerService>(&mut self, timers: &mut T) {
        self.cancel(timers);
        if self.is_enabled() {
            self.pending = Some(timers.schedule(self.timeout_ms, TimerKind::GlanceTimeout));
        }
    }

    /// Cancel the pending timeout, if any
    pub fn cancel<T: TimerService>(&mut self, timers: &mut T) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    /// Consume a timer expiry
    ///
    /// Returns true only if `handle` is the pending timeout. Anything else
    /// is a stale or foreign handle and is ignored.
    pub fn expire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct MockTimers {
        next_id: u32,
        scheduled: Vec<(TimerHandle, u32), 8>,
        cancelled: Vec<TimerHandle, 8>,
    }

    impl TimerService for MockTimers {
        fn schedule(&mut self, delay_ms: u32, _kind: TimerKind) -> TimerHandle {
            self.next_id += 1;
            let handle = TimerHandle(self.next_id);
            self.scheduled.push((handle, delay_ms)).unwrap();
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle).unwrap();
        }
    }

    #[test]
    fn test_disabled_never_schedules() {
        let mut timers = MockTimers::default();
        let mut timeout = GlanceTimeout::new(0);
        timeout.arm(&mut timers);
        assert!(!timeout.is_pending());
        assert!(timers.scheduled.is_empty());
    }

    #[test]
    fn test_arm_and_expire() {
        let mut timers = MockTimers::default();
        let mut timeout = GlanceTimeout::new(5_000);
        timeout.arm(&mut timers);

        assert_eq!(timers.scheduled[0].1, 5_000);
        let handle = timers.scheduled[0].0;
        assert!(timeout.expire(handle));
        assert!(!timeout.is_pending());
        // Second delivery of the same handle is stale
        assert!(!timeout.expire(handle));
    }

    #[test]
    fn test_rearm_cancels_previous() {
        let mut timers = MockTimers::default();
        let mut timeout = GlanceTimeout::new(1_000);
        timeout.arm(&mut timers);
        timeout.arm(&mut timers);

        let first = timers.scheduled[0].0;
        let second = timers.scheduled[1].0;
        assert_eq!(timers.cancelled.as_slice(), &[first]);
        assert!(!timeout.expire(first));
        assert!(timeout.expire(second));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = MockTimers::default();
        let mut timeout = GlanceTimeout::new(1_000);

        timeout.cancel(&mut timers);
        assert!(timers.cancelled.is_empty());

        timeout.arm(&mut timers);
        let handle = timers.scheduled[0].0;
        timeout.cancel(&mut timers);
        timeout.cancel(&mut timers);
        assert_eq!(timers.cancelled.len(), 1);

        // A late expiry after cancellation is ignored
        assert!(!timeout.expire(handle));
    }
}
