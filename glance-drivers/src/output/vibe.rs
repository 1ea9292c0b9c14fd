//! Vibration motor
//!
//! On/off motor behind a GPIO-driven transistor. Patterns are lists of
//! segment durations in ms, alternating on and off and starting with on.
//!
//! # Usage
//!
//! ```ignore
//! motor.vibrate_double_pulse();
//! let mut segment = motor.segment_ms();
//! while let Some(ms) = segment {
//!     Timer::after_millis(ms as u64).await;
//!     segment = motor.advance();
//! }
//! ```

use embedded_hal::digital::OutputPin;
use glance_core::traits::Haptics;

/// Two short buzzes
pub const DOUBLE_PULSE: &[u16] = &[100, 100, 100];

/// Vibration motor driver
pub struct VibeMotor<P> {
    pin: P,
    pattern: &'static [u16],
    /// Index of the running segment (== len when idle)
    index: usize,
}

impl<P: OutputPin> VibeMotor<P> {
    /// Create a stopped motor
    pub fn new(pin: P) -> Self {
        let mut motor = Self {
            pin,
            pattern: &[],
            index: 0,
        };
        motor.drive(false);
        motor
    }

    /// Start a pattern, replacing any running one
    pub fn play(&mut self, pattern: &'static [u16]) {
        self.pattern = pattern;
        self.index = 0;
        self.apply();
    }

    /// Duration of the running segment, or None when idle
    pub fn segment_ms(&self) -> Option<u16> {
        self.pattern.get(self.index).copied()
    }

    /// Move to the next segment
    ///
    /// Returns its duration, or None once the pattern has finished and the
    /// motor is off.
    pub fn advance(&mut self) -> Option<u16> {
        if self.index < self.pattern.len() {
            self.index += 1;
        }
        self.apply();
        self.segment_ms()
    }

    /// Stop immediately
    pub fn stop(&mut self) {
        self.index = self.pattern.len();
        self.drive(false);
    }

    pub fn is_running(&self) -> bool {
        self.index < self.pattern.len()
    }

    fn apply(&mut self) {
        // Even segments are "on"
        let on = self.is_running() && self.index % 2 == 0;
        self.drive(on);
    }

    fn drive(&mut self, on: bool) {
        // Board GPIO writes cannot fail; an error here has nowhere to go
        let _ = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

impl<P: OutputPin> Haptics for VibeMotor<P> {
    fn vibrate_double_pulse(&mut self) {
        self.play(DOUBLE_PULSE);
    }
}
