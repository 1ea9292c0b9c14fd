//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod accel;
pub mod backlight;
pub mod button;
pub mod glance;
pub mod timer;
pub mod vibe;

pub use accel::accel_task;
pub use backlight::backlight_task;
pub use button::button_task;
pub use glance::glance_task;
pub use timer::timer_task;
pub use vibe::vibe_task;
