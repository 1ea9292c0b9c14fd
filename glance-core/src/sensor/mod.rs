//! Accelerometer input types
//!
//! Samples, batches and tap events as delivered by the sensor feeds.

pub mod sample;

pub use sample::{AccelSample, Axis, Batch, TapEvent, MAX_BATCH_SIZE};
