//! Test doubles for the platform capabilities

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use super::glance::GlanceEngine;
use crate::config::SamplingConfig;
use crate::state::GlanceState;
use crate::traits::{
    Backlight, Clock, GlanceHandler, Haptics, SensorFeeds, TimerHandle, TimerKind, TimerService,
};

/// A timer waiting to fire
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub delay_ms: u32,
    pub deadline_ms: u64,
}

/// Recording platform with a manually advanced clock
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub now_ms: u64,
    next_id: u32,
    pub timers: Vec<ScheduledTimer>,
    pub cancelled: Vec<TimerHandle>,
    pub light_on: bool,
    pub pulses: u32,
    pub forced_off: u32,
    pub vibrations: u32,
    pub accel: Option<SamplingConfig>,
    pub taps: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending timers of one kind
    pub fn pending(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    /// First pending timer of one kind
    pub fn find(&self, kind: TimerKind) -> Option<ScheduledTimer> {
        self.timers.iter().copied().find(|t| t.kind == kind)
    }

    /// Remove the earliest timer due at or before `until_ms`
    ///
    /// Moves the clock to its deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let (idx, timer) = self
            .timers
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= until_ms)
            .min_by_key(|(_, t)| t.deadline_ms)?;
        self.timers.remove(idx);
        self.now_ms = self.now_ms.max(timer.deadline_ms);
        Some(timer.handle)
    }
}

impl Clock for MockPlatform {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl TimerService for MockPlatform {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push(ScheduledTimer {
            handle,
            kind,
            delay_ms,
            deadline_ms: self.now_ms + delay_ms as u64,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
        self.cancelled.push(handle);
    }
}

impl Backlight for MockPlatform {
    fn set_on(&mut self, on: bool) {
        self.light_on = on;
        if !on {
            self.forced_off += 1;
        }
    }

    fn pulse_interactive(&mut self) {
        self.light_on = true;
        self.pulses += 1;
    }
}

impl Haptics for MockPlatform {
    fn vibrate_double_pulse(&mut self) {
        self.vibrations += 1;
    }
}

impl SensorFeeds for MockPlatform {
    fn start_accel(&mut self, sampling: SamplingConfig) {
        self.accel = Some(sampling);
    }

    fn stop_accel(&mut self) {
        self.accel = None;
    }

    fn start_taps(&mut self) {
        self.taps = true;
    }

    fn stop_taps(&mut self) {
        self.taps = false;
    }
}

/// States delivered to a subscriber
pub type Recorded = Rc<RefCell<Vec<GlanceState>>>;

/// Subscriber that records every state it receives
pub fn recorder() -> (Recorded, impl FnMut(GlanceState)) {
    let states: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = states.clone();
    (states, move |state| sink.borrow_mut().push(state))
}

/// Fire every timer due up to `until_ms`, then park the clock there
pub fn advance<H: GlanceHandler>(
    engine: &mut GlanceEngine<H>,
    hw: &mut MockPlatform,
    until_ms: u64,
) {
    while let Some(handle) = hw.pop_due(until_ms) {
        engine.on_timer(hw, handle);
    }
    hw.now_ms = until_ms;
}
