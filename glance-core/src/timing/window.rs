//! Timing window tracker
//!
//! All times are absolute milliseconds from the platform clock.

/// Rearm deadline and last active-zone contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowTracker {
    /// Activation is permitted while `now < rearm_deadline_ms`
    ///
    /// Zero means "never armed".
    rearm_deadline_ms: u64,
    /// Most recent sample classified Active
    last_active_ms: Option<u64>,
}

impl WindowTracker {
    /// Create a tracker with no window armed and no active contact
    pub const fn new() -> Self {
        Self {
            rearm_deadline_ms: 0,
            last_active_ms: None,
        }
    }

    /// Open the rearm window for `duration_ms` starting at `now_ms`
    pub fn arm_rearm_window(&mut self, now_ms: u64, duration_ms: u32) {
        self.rearm_deadline_ms = now_ms.saturating_add(duration_ms as u64);
    }

    /// Check if the rearm window is still open
    pub fn is_armed(&self, now_ms: u64) -> bool {
        now_ms < self.rearm_deadline_ms
    }

    /// Record contact with the active zone
    pub fn touch_active(&mut self, now_ms: u64) {
        self.last_active_ms = Some(now_ms);
    }

    /// Check if the last active contact was less than `window_ms` ago
    pub fn within_roll_window(&self, now_ms: u64, window_ms: u32) -> bool {
        match self.last_active_ms {
            Some(last) => now_ms < last.saturating_add(window_ms as u64),
            None => false,
        }
    }

    /// Absolute rearm deadline (0 if never armed)
    pub fn rearm_deadline_ms(&self) -> u64 {
        self.rearm_deadline_ms
    }

    /// Timestamp of the last active contact
    pub fn last_active_ms(&self) -> Option<u64> {
        self.last_active_ms
    }
}
