//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.
//!
//! Sensor input flows into the glance task; commands flow out of it to the
//! tasks that own the accelerometer, timers, backlight and motor.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::Instant;

use glance_core::config::SamplingConfig;
use glance_core::sensor::{Batch, TapEvent};
use glance_core::traits::TimerHandle;

/// Channel capacity for sample batches
const BATCH_CHANNEL_SIZE: usize = 4;

/// Channel capacity for tap events
const TAP_CHANNEL_SIZE: usize = 4;

/// Channel capacity for timer traffic
const TIMER_CHANNEL_SIZE: usize = 8;

/// Channel capacity for feed and backlight commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Accelerometer feed commands (glance task -> accel task)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedCommand {
    StartAccel(SamplingConfig),
    StopAccel,
    StartTaps,
    StopTaps,
}

/// Timer commands (glance task -> timer task)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    Schedule { handle: TimerHandle, deadline: Instant },
    Cancel(TimerHandle),
}

/// Backlight commands (glance task -> backlight task)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightCommand {
    On,
    Off,
    Pulse,
}

/// Sample batches from the accelerometer
pub static BATCH_CHANNEL: Channel<CriticalSectionRawMutex, Batch, BATCH_CHANNEL_SIZE> =
    Channel::new();

/// Taps from the accelerometer
pub static TAP_CHANNEL: Channel<CriticalSectionRawMutex, TapEvent, TAP_CHANNEL_SIZE> =
    Channel::new();

/// Expired timers
pub static TIMER_FIRED: Channel<CriticalSectionRawMutex, TimerHandle, TIMER_CHANNEL_SIZE> =
    Channel::new();

/// Timer schedule/cancel requests
pub static TIMER_CMD: Channel<CriticalSectionRawMutex, TimerCommand, TIMER_CHANNEL_SIZE> =
    Channel::new();

/// Feed start/stop requests
pub static FEED_CMD: Channel<CriticalSectionRawMutex, FeedCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Backlight requests, applied in order
pub static LIGHT_CMD: Channel<CriticalSectionRawMutex, LightCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Request a double-pulse vibration
pub static VIBE_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Toggle glance detection on or off (button press)
pub static TOGGLE_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();
