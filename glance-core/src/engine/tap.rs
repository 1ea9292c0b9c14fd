//! Tap fallback controller
//!
//! When the engine owns the backlight, the accelerometer's own
//! flick-to-light reaction would fight it. Taps outside a glance either
//! keep the old behavior (pulse) or force the light off.

use crate::state::GlanceState;
use crate::traits::Backlight;

/// What the controller did with a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapResponse {
    /// Backlight control disabled, or currently glancing
    Ignored,
    /// Legacy flick-to-light pulse
    Pulsed,
    /// Light forced off
    ForcedOff,
}

/// Reacts to discrete taps without touching glance state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapFallback {
    enabled: bool,
    legacy_flick: bool,
}

impl TapFallback {
    pub const fn new(enabled: bool, legacy_flick: bool) -> Self {
        Self {
            enabled,
            legacy_flick,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Handle one tap given the current glance state
    pub fn on_tap<L: Backlight>(&self, light: &mut L, state: GlanceState) -> TapResponse {
        if !self.enabled || state.is_glancing() {
            return TapResponse::Ignored;
        }

        if self.legacy_flick {
            light.pulse_interactive();
            TapResponse::Pulsed
        } else {
            light.set_on(false);
            TapResponse::ForcedOff
        }
    }
}
