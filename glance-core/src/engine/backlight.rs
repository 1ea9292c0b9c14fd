//! Backlight driver
//!
//! While the wearer is glancing the light is re-pulsed every fade interval.
//! The first tick after the glance ends switches the light off and stops
//! rescheduling. The light capability has no "turn off later" primitive,
//! so this loop is what keeps it on for exactly as long as the glance.

use crate::state::GlanceState;
use crate::traits::{Backlight, TimerHandle, TimerKind, TimerService};

/// Self-rescheduling backlight loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightDriver {
    /// Engine owns the backlight
    enabled: bool,
    /// Interval between pulses while glancing
    fade_ms: u32,
    /// Next scheduled tick
    pending: Option<TimerHandle>,
}

impl BacklightDriver {
    pub const fn new(enabled: bool, fade_ms: u32) -> Self {
        Self {
            enabled,
            fade_ms,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a tick is scheduled
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the loop on entering Active
    ///
    /// If a tick is already scheduled the running loop is kept; it will see
    /// the new glance on its next tick.
    pub fn start<P: TimerService + Backlight>(&mut self, hw: &mut P, state: GlanceState) {
        if !self.enabled || self.pending.is_some() {
            return;
        }
        self.tick(hw, state);
    }

    /// Run one iteration of the loop
    pub fn tick<P: TimerService + Backlight>(&mut self, hw: &mut P, state: GlanceState) {
        if state.is_glancing() {
            hw.pulse_interactive();
            self.pending = Some(hw.schedule(self.fade_ms, TimerKind::LightFade));
        } else {
            hw.set_on(false);
            self.pending = None;
        }
    }

    /// Consume a timer expiry
    ///
    /// Returns true if `handle` is this loop's pending tick.
    pub fn expire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending tick without touching the light
    pub fn stop<T: TimerService>(&mut self, timers: &mut T) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}
