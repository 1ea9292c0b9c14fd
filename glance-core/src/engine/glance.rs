//! Glance engine
//!
//! Per batch, samples are evaluated in order and the first matching rule
//! applies:
//!
//! 1. Downward zone: re-arm the latch, open the downward rearm window, go
//!    Inactive, cancel the timeout, stop.
//! 2. Away zone: re-arm the latch, go Inactive, cancel the timeout, open
//!    the away rearm window only if the wrist was active within the roll
//!    window, stop.
//! 3. Active zone: record the contact. If every sample so far was active
//!    and this completes a full-size batch, the latch is set and the rearm window
//!    is open, the glance starts: vibrate, clear the latch, go Active,
//!    schedule the timeout, start the backlight loop, stop.
//! 4. Dead zone: nothing.
//!
//! A batch with no active or inactive sample at all forces Inactive without
//! touching the latch or rearm window.

use crate::config::{GlanceConfig, SubscribeOptions, WindowConfig};
use crate::sensor::{AccelSample, TapEvent};
use crate::state::{GlanceEvent, GlanceState};
use crate::timing::{GlanceTimeout, WindowTracker};
use crate::traits::{GlanceHandler, Platform, TimerHandle};
use crate::zone::{ZoneLabel, ZoneSet};

use super::backlight::BacklightDriver;
use super::tap::{TapFallback, TapResponse};

/// Wrist-glance detector for one subscription
pub struct GlanceEngine<H> {
    /// Current externally visible state
    state: GlanceState,
    /// Set by an inactive-zone touch, cleared by activation
    unglanced: bool,
    /// Rearm and roll windows
    window: WindowTracker,
    /// Glance timeout
    timeout: GlanceTimeout,
    /// Backlight loop
    backlight: BacklightDriver,
    /// Tap handling outside glances
    tap: TapFallback,
    /// Window durations
    windows: WindowConfig,
    /// Zone geometry
    zones: ZoneSet,
    /// Samples per full batch
    batch_size: usize,
    /// Label of the most recently evaluated sample
    last_zone: Option<ZoneLabel>,
    /// Subscriber
    handler: H,
}

impl<H: GlanceHandler> GlanceEngine<H> {
    /// Create an engine in the Inactive state
    pub fn new(config: &GlanceConfig, options: SubscribeOptions, handler: H) -> Self {
        Self {
            state: GlanceState::Inactive,
            unglanced: true,
            window: WindowTracker::new(),
            timeout: GlanceTimeout::new(options.timeout_ms),
            backlight: BacklightDriver::new(
                options.control_backlight,
                config.windows.light_fade_ms,
            ),
            tap: TapFallback::new(options.control_backlight, options.legacy_flick_backlight),
            windows: config.windows,
            zones: config.zones,
            batch_size: config.sampling.batch_size as usize,
            last_zone: None,
            handler,
        }
    }

    /// Get current glance state
    pub fn state(&self) -> GlanceState {
        self.state
    }

    /// Check if the next qualifying batch may trigger Active
    pub fn is_unglanced(&self) -> bool {
        self.unglanced
    }

    /// Get the timing windows
    pub fn window(&self) -> &WindowTracker {
        &self.window
    }

    /// Label of the last sample evaluated
    pub fn last_zone(&self) -> Option<ZoneLabel> {
        self.last_zone
    }

    /// Check if a glance timeout is scheduled
    pub fn timeout_pending(&self) -> bool {
        self.timeout.is_pending()
    }

    /// Check if the engine owns the backlight
    pub fn controls_backlight(&self) -> bool {
        self.backlight.is_enabled()
    }

    /// Check if the backlight loop has a tick scheduled
    pub fn backlight_running(&self) -> bool {
        self.backlight.is_running()
    }

    /// Process one delivered batch
    pub fn on_accel_batch<P: Platform>(&mut self, hw: &mut P, batch: &[AccelSample]) {
        let now_ms = hw.now_ms();
        let mut active_count = 0usize;
        let mut matched = false;

        for sample in batch {
            let label = self.zones.classify(sample);
            self.last_zone = Some(label);

            match label {
                ZoneLabel::InactiveDownward => {
                    self.unglanced = true;
                    self.window.arm_rearm_window(now_ms, self.windows.downward_ms);
                    self.timeout.cancel(hw);
                    self.apply(GlanceEvent::InactiveTouch);
                    return;
                }
                ZoneLabel::InactiveAway => {
                    self.unglanced = true;
                    self.timeout.cancel(hw);
                    self.apply(GlanceEvent::InactiveTouch);
                    if self.window.within_roll_window(now_ms, self.windows.roll_ms) {
                        trace!("away touch after roll, rearming");
                        self.window.arm_rearm_window(now_ms, self.windows.away_ms);
                    }
                    return;
                }
                ZoneLabel::Active => {
                    matched = true;
                    self.window.touch_active(now_ms);
                    active_count += 1;

                    // A short batch never counts as a full active batch
                    if active_count == self.batch_size
                        && batch.len() == self.batch_size
                        && self.unglanced
                        && self.window.is_armed(now_ms)
                    {
                        self.activate(hw);
                        return;
                    }
                }
                ZoneLabel::Ambiguous => {}
            }
        }

        if !matched {
            self.timeout.cancel(hw);
            self.apply(GlanceEvent::AmbiguousBatch);
        }
    }

    /// Process one tap event
    pub fn on_tap<P: Platform>(&mut self, hw: &mut P, tap: TapEvent) -> TapResponse {
        let response = self.tap.on_tap(hw, self.state);
        trace!("tap {:?}: {:?}", tap, response);
        response
    }

    /// Process a timer expiry
    ///
    /// Handles that are no longer pending (cancelled, or already consumed)
    /// are ignored.
    pub fn on_timer<P: Platform>(&mut self, hw: &mut P, handle: TimerHandle) {
        if self.timeout.expire(handle) {
            self.apply(GlanceEvent::TimeoutExpired);
        } else if self.backlight.expire(handle) {
            self.backlight.tick(hw, self.state);
        } else {
            trace!("ignoring stale timer {:?}", handle);
        }
    }

    /// Cancel every pending timer
    pub fn shutdown<P: Platform>(&mut self, hw: &mut P) {
        self.timeout.cancel(hw);
        self.backlight.stop(hw);
    }

    fn activate<P: Platform>(&mut self, hw: &mut P) {
        hw.vibrate_double_pulse();
        self.unglanced = false;
        self.apply(GlanceEvent::GlanceDetected);
        self.timeout.arm(hw);
        self.backlight.start(hw, self.state);
    }

    /// Apply an event, notifying the subscriber only on an actual change
    fn apply(&mut self, event: GlanceEvent) {
        let next = self.state.transition(event);
        if next != self.state {
            debug!("glance {:?} -> {:?} ({:?})", self.state, next, event);
            self.state = next;
            self.handler.on_glance_state(next);
        }
    }
}
