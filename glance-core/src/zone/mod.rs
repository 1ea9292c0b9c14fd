//! Wrist orientation zones
//!
//! Static cuboid regions of accelerometer space and the classifier that
//! maps a sample onto them.

pub mod classifier;

pub use classifier::{AxisRange, Zone, ZoneLabel, ZoneSet};
