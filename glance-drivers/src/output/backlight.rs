//! GPIO backlight output
//!
//! Drives the backlight enable line through a GPIO pin (directly or via a
//! load switch). Two ways to light it:
//!
//! - Forced: `set_on(true)` keeps it lit until `set_on(false)`.
//! - Interactive: `pulse_interactive()` lights it and starts a hold
//!   period. The owner waits [`GpioBacklight::hold_ms`] and then calls
//!   [`GpioBacklight::release`] with the generation it was given; a newer
//!   pulse or a forced state in the meantime makes that release a no-op.

use embedded_hal::digital::OutputPin;
use glance_core::traits::Backlight;

/// Default interactive hold time (ms)
pub const DEFAULT_HOLD_MS: u32 = 3000;

/// GPIO backlight
pub struct GpioBacklight<P> {
    pin: P,
    /// If true, backlight ON = pin LOW
    inverted: bool,
    /// Interactive hold period in ms
    hold_ms: u32,
    /// Forced on by the owner
    forced: bool,
    /// Lit by an interactive pulse that has not been released yet
    interactive: bool,
    /// Incremented on every pulse
    generation: u32,
}

impl<P: OutputPin> GpioBacklight<P> {
    /// Create a backlight output; starts dark
    pub fn new(pin: P, inverted: bool, hold_ms: u32) -> Self {
        let mut light = Self {
            pin,
            inverted,
            hold_ms,
            forced: false,
            interactive: false,
            generation: 0,
        };
        light.drive(false);
        light
    }

    /// Create an active-high backlight with the default hold time
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false, DEFAULT_HOLD_MS)
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }

    /// Generation of the most recent interactive pulse
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_lit(&self) -> bool {
        self.forced || self.interactive
    }

    /// End an interactive hold
    ///
    /// Returns true if this call turned the light off.
    pub fn release(&mut self, generation: u32) -> bool {
        if generation != self.generation || !self.interactive {
            return false;
        }
        self.interactive = false;
        if self.forced {
            return false;
        }
        self.drive(false);
        true
    }

    fn drive(&mut self, on: bool) {
        // Board GPIO writes cannot fail; an error here has nowhere to go
        let _ = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    fn set_on(&mut self, on: bool) {
        self.forced = on;
        // Forcing off also cancels any interactive hold
        self.interactive = false;
        self.drive(on);
    }

    fn pulse_interactive(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.interactive = true;
        self.drive(true);
    }
}
