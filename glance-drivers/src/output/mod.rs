//! Display backlight and vibration motor outputs

pub mod backlight;
pub mod vibe;

pub use backlight::GpioBacklight;
pub use vibe::{VibeMotor, DOUBLE_PULSE};
