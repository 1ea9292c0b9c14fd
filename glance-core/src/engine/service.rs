//! Glance service
//!
//! Owns the platform and at most one engine. Subscribing creates the engine
//! and starts the sensor feeds; unsubscribing stops the feeds, cancels every
//! pending timer and drops the engine. Events arriving while unsubscribed
//! are discarded.

use crate::config::{ConfigError, GlanceConfig, SubscribeOptions};
use crate::sensor::{AccelSample, TapEvent};
use crate::state::GlanceState;
use crate::traits::{GlanceHandler, Platform, TimerHandle};

use super::glance::GlanceEngine;

/// Lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceError {
    /// A subscription is already active
    AlreadySubscribed,
    /// No subscription to cancel
    NotSubscribed,
    /// Configuration failed validation
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for ServiceError {
    fn from(e: ConfigError) -> Self {
        ServiceError::InvalidConfig(e)
    }
}

/// Single-subscription glance service
pub struct GlanceService<P, H> {
    platform: P,
    config: GlanceConfig,
    engine: Option<GlanceEngine<H>>,
}

impl<P: Platform, H: GlanceHandler> GlanceService<P, H> {
    /// Create an idle service
    pub fn new(platform: P, config: GlanceConfig) -> Self {
        Self {
            platform,
            config,
            engine: None,
        }
    }

    /// Start detecting glances
    ///
    /// Rejects a second subscription instead of replacing the first, so
    /// feeds and handlers are never registered twice.
    pub fn subscribe(&mut self, options: SubscribeOptions, handler: H) -> Result<(), ServiceError> {
        if self.engine.is_some() {
            warn!("glance subscribe rejected: already subscribed");
            return Err(ServiceError::AlreadySubscribed);
        }
        self.config.validate()?;

        debug!(
            "glance subscribe: timeout={}ms backlight={} legacy_flick={}",
            options.timeout_ms,
            options.control_backlight,
            options.legacy_flick_backlight
        );

        self.engine = Some(GlanceEngine::new(&self.config, options, handler));
        self.platform.start_accel(self.config.sampling);
        if options.control_backlight {
            self.platform.start_taps();
        }
        Ok(())
    }

    /// Stop detecting glances
    ///
    /// Returns `NotSubscribed` without side effects if there is nothing to
    /// stop; callers that want idempotent behavior can ignore that error.
    pub fn unsubscribe(&mut self) -> Result<(), ServiceError> {
        let mut engine = self.engine.take().ok_or(ServiceError::NotSubscribed)?;

        self.platform.stop_accel();
        if engine.controls_backlight() {
            self.platform.stop_taps();
        }
        engine.shutdown(&mut self.platform);

        debug!("glance unsubscribed");
        Ok(())
    }

    /// Deliver a sample batch
    pub fn on_accel_batch(&mut self, batch: &[AccelSample]) {
        if let Some(engine) = self.engine.as_mut() {
            engine.on_accel_batch(&mut self.platform, batch);
        }
    }

    /// Deliver a tap event
    pub fn on_tap(&mut self, tap: TapEvent) {
        if let Some(engine) = self.engine.as_mut() {
            engine.on_tap(&mut self.platform, tap);
        }
    }

    /// Deliver a timer expiry
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if let Some(engine) = self.engine.as_mut() {
            engine.on_timer(&mut self.platform, handle);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.engine.is_some()
    }

    /// Current glance state, if subscribed
    pub fn state(&self) -> Option<GlanceState> {
        self.engine.as_ref().map(|e| e.state())
    }

    pub fn engine(&self) -> Option<&GlanceEngine<H>> {
        self.engine.as_ref()
    }

    pub fn config(&self) -> &GlanceConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
