//! Backlight and haptic output traits

/// Display backlight control
pub trait Backlight {
    /// Force the backlight on or off
    fn set_on(&mut self, on: bool);

    /// Keep the backlight on briefly, then let it fade on its own
    ///
    /// Fire-and-forget; there is no way to cancel a pulse.
    fn pulse_interactive(&mut self);
}

/// Vibration motor control
pub trait Haptics {
    /// Short double buzz acknowledging a glance
    fn vibrate_double_pulse(&mut self);
}
