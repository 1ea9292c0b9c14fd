//! Board platform for the glance engine
//!
//! Implements the glance-core capability traits by forwarding requests to
//! the tasks that own each peripheral. Every method is non-blocking: the
//! engine runs inside the glance task and must never await.

use defmt::*;
use embassy_time::{Duration, Instant};

use glance_core::config::SamplingConfig;
use glance_core::traits::{
    Backlight, Clock, Haptics, SensorFeeds, TimerHandle, TimerKind, TimerService,
};

use crate::channels::{
    FeedCommand, LightCommand, TimerCommand, BATCH_CHANNEL, FEED_CMD, LIGHT_CMD, TAP_CHANNEL,
    TIMER_CMD, VIBE_SIGNAL,
};

/// Task-backed platform
pub struct BoardPlatform {
    next_timer: u32,
}

impl BoardPlatform {
    pub const fn new() -> Self {
        Self { next_timer: 0 }
    }

    fn feed(&self, cmd: FeedCommand) {
        if FEED_CMD.try_send(cmd).is_err() {
            warn!("Feed command dropped: {:?}", cmd);
        }
    }

    fn light(&self, cmd: LightCommand) {
        if LIGHT_CMD.try_send(cmd).is_err() {
            warn!("Light command dropped: {:?}", cmd);
        }
    }
}

impl Clock for BoardPlatform {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

impl TimerService for BoardPlatform {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        self.next_timer = self.next_timer.wrapping_add(1);
        let handle = TimerHandle(self.next_timer);
        let deadline = Instant::now() + Duration::from_millis(delay_ms as u64);

        trace!("Schedule {:?} {} in {}ms", kind, handle, delay_ms);
        if TIMER_CMD
            .try_send(TimerCommand::Schedule { handle, deadline })
            .is_err()
        {
            // The engine ignores handles that never fire
            warn!("Timer queue full, {:?} not scheduled", kind);
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if TIMER_CMD.try_send(TimerCommand::Cancel(handle)).is_err() {
            warn!("Timer queue full, cancel of {} dropped", handle);
        }
    }
}

impl Backlight for BoardPlatform {
    fn set_on(&mut self, on: bool) {
        self.light(if on { LightCommand::On } else { LightCommand::Off });
    }

    fn pulse_interactive(&mut self) {
        self.light(LightCommand::Pulse);
    }
}

impl Haptics for BoardPlatform {
    fn vibrate_double_pulse(&mut self) {
        VIBE_SIGNAL.signal(());
    }
}

impl SensorFeeds for BoardPlatform {
    fn start_accel(&mut self, sampling: SamplingConfig) {
        self.feed(FeedCommand::StartAccel(sampling));
    }

    fn stop_accel(&mut self) {
        self.feed(FeedCommand::StopAccel);
        // Drop batches read before the stop
        BATCH_CHANNEL.clear();
    }

    fn start_taps(&mut self) {
        self.feed(FeedCommand::StartTaps);
    }

    fn stop_taps(&mut self) {
        self.feed(FeedCommand::StopTaps);
        TAP_CHANNEL.clear();
    }
}
