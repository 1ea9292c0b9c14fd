//! Glance detection engine
//!
//! The engine consumes sample batches, tap events and timer expiries on a
//! single event loop. The service owns the subscribe/unsubscribe lifecycle
//! and at most one engine at a time.

pub mod backlight;
pub mod glance;
pub mod service;
pub mod tap;

#[cfg(test)]
pub(crate) mod mock;

pub use backlight::BacklightDriver;
pub use glance::GlanceEngine;
pub use service::{GlanceService, ServiceError};
pub use tap::{TapFallback, TapResponse};
