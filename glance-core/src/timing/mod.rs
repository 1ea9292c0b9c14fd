//! Time-based hysteresis
//!
//! Rearm and roll windows, plus the cancellable glance timeout.

pub mod timeout;
pub mod window;

pub use timeout::GlanceTimeout;
pub use window::WindowTracker;
