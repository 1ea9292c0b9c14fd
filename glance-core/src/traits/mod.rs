//! Platform capability traits
//!
//! These traits define the interface between the glance engine and the
//! board: clock, timers, backlight, vibration motor and sensor feeds.
//! Firmware implements them over real peripherals; tests substitute mocks.

pub mod handler;
pub mod output;
pub mod sensor;
pub mod timer;

pub use handler::GlanceHandler;
pub use output::{Backlight, Haptics};
pub use sensor::SensorFeeds;
pub use timer::{Clock, TimerHandle, TimerKind, TimerService};

/// Everything the engine needs from the board
pub trait Platform: Clock + TimerService + Backlight + Haptics + SensorFeeds {}

impl<T: Clock + TimerService + Backlight + Haptics + SensorFeeds> Platform for T {}
