//! Configuration type definitions
//!
//! These types describe how the detector is tuned: zone geometry, window
//! durations, sampling parameters and the default subscription options.
//! Configuration is static for the lifetime of a subscription.

use crate::sensor::MAX_BATCH_SIZE;
use crate::zone::ZoneSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Highest sampling rate accepted (Hz)
pub const MAX_SAMPLING_HZ: u16 = 400;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An axis range has start > end
    InvalidRange,
    /// Two named zones share a region
    OverlappingZones,
    /// Batch size is zero or exceeds the FIFO depth
    InvalidBatchSize,
    /// Sampling rate is zero or above the supported maximum
    InvalidSamplingRate,
    /// Config version does not match this firmware
    VersionMismatch,
}

/// Time windows used by the hysteresis logic (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    /// Rearm duration after a downward-zone touch
    pub downward_ms: u32,
    /// Rearm duration after an away-zone touch that followed active contact
    pub away_ms: u32,
    /// How recently the wrist must have been active for an away touch to
    /// count as a roll
    pub roll_ms: u32,
    /// Backlight re-pulse interval while glancing
    pub light_fade_ms: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            downward_ms: 1000,
            away_ms: 1000,
            roll_ms: 500,
            light_fade_ms: 500,
        }
    }
}

/// Accelerometer feed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Samples per delivered batch
    pub batch_size: u8,
    /// Output data rate (Hz)
    pub rate_hz: u16,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        // 10 Hz with 5-sample batches gives a 0.5 s update rate
        Self {
            batch_size: 5,
            rate_hz: 10,
        }
    }
}

impl SamplingConfig {
    /// Time between batch deliveries in milliseconds
    pub fn batch_period_ms(&self) -> u32 {
        if self.rate_hz == 0 {
            return 0;
        }
        (self.batch_size as u32 * 1000) / self.rate_hz as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size as usize > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.rate_hz == 0 || self.rate_hz > MAX_SAMPLING_HZ {
            return Err(ConfigError::InvalidSamplingRate);
        }
        Ok(())
    }
}

/// Per-subscription options
///
/// Mirrors the arguments of a glance subscription. Construct through
/// [`SubscribeOptions::new`] so a negative timeout collapses to "disabled".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscribeOptions {
    /// Glance timeout (0 = never time out)
    pub timeout_ms: u32,
    /// Let the engine own the backlight
    pub control_backlight: bool,
    /// Keep flick-to-light behavior while not glancing
    pub legacy_flick_backlight: bool,
}

impl SubscribeOptions {
    /// Create options, clamping a negative timeout to disabled
    pub fn new(timeout_ms: i32, control_backlight: bool, legacy_flick_backlight: bool) -> Self {
        Self {
            timeout_ms: timeout_ms.max(0) as u32,
            control_backlight,
            legacy_flick_backlight,
        }
    }

    /// Check if the glance timeout is enabled
    pub fn timeout_enabled(&self) -> bool {
        self.timeout_ms > 0
    }
}

/// Complete detector configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlanceConfig {
    /// Format version
    pub version: u8,
    /// Default glance timeout; zero or negative disables it
    pub timeout_ms: i32,
    /// Default backlight ownership
    pub control_backlight: bool,
    /// Default flick-to-light behavior
    pub legacy_flick_backlight: bool,
    /// Accelerometer feed parameters
    pub sampling: SamplingConfig,
    /// Hysteresis windows
    pub windows: WindowConfig,
    /// Zone geometry
    pub zones: ZoneSet,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            timeout_ms: 5000,
            control_backlight: true,
            legacy_flick_backlight: false,
            sampling: SamplingConfig::default(),
            windows: WindowConfig::default(),
            zones: ZoneSet::default(),
        }
    }
}

impl GlanceConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        self.sampling.validate()?;
        self.zones.validate()
    }

    /// Subscription options carried by this configuration
    pub fn subscribe_options(&self) -> SubscribeOptions {
        SubscribeOptions::new(
            self.timeout_ms,
            self.control_backlight,
            self.legacy_flick_backlight,
        )
    }
}
