//! Accelerometer sample and tap event types

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest batch a feed may deliver in one callback
///
/// Matches the 32-entry hardware FIFO of LIS3DH-class parts.
pub const MAX_BATCH_SIZE: usize = 32;

/// A single 3-axis accelerometer reading
///
/// Values are in milli-g (1000 = 1 g). Axes follow the watch face:
/// +x toward 3 o'clock, +y toward 12 o'clock, +z out of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    /// Create a sample from raw milli-g values
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// A group of samples delivered together
///
/// Batch boundaries matter: the engine evaluates "every sample in this
/// batch" as one unit.
pub type Batch = Vec<AccelSample, MAX_BATCH_SIZE>;

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A discrete tap (click) reported by the accelerometer
///
/// The engine only cares that a tap happened; axis and direction are
/// carried for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    /// Axis with the strongest response
    pub axis: Axis,
    /// Sign of the response on that axis (+1 or -1)
    pub direction: i8,
}

impl TapEvent {
    /// Create a tap event
    pub const fn new(axis: Axis, direction: i8) -> Self {
        Self { axis, direction }
    }
}
