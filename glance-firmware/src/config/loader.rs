//! Embedded configuration loader
//!
//! Parses and validates the embedded glance.toml. build.rs already rejects
//! a broken file, so the fallback only matters while developing.

use defmt::*;

use glance_core::config::{parse_config, GlanceConfig};

/// Embedded configuration (compiled into firmware)
/// Edit glance.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../glance.toml");

/// Load the detector configuration
///
/// Returns the built-in defaults if the embedded file cannot be read or
/// fails validation.
pub fn load_config() -> GlanceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return GlanceConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {:?}", e);
        error!("Using default configuration");
        return GlanceConfig::default();
    }

    info!(
        "Config: batch {} @ {}Hz, timeout {}ms",
        config.sampling.batch_size, config.sampling.rate_hz, config.timeout_ms
    );
    config
}
