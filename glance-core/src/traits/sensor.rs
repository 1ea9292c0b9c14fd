//! Accelerometer feed control

use crate::config::SamplingConfig;

/// Start and stop the accelerometer feeds
///
/// Starting a feed means batches (or taps) begin arriving on the event
/// loop; stopping it must take effect before the call returns, so no
/// callback is delivered afterwards.
pub trait SensorFeeds {
    /// Start delivering sample batches
    fn start_accel(&mut self, sampling: SamplingConfig);

    /// Stop delivering sample batches
    fn stop_accel(&mut self);

    /// Start delivering tap events
    fn start_taps(&mut self);

    /// Stop delivering tap events
    fn stop_taps(&mut self);
}
