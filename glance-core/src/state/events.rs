//! Events that trigger glance state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlanceEvent {
    /// A sample landed in one of the inactive zones
    InactiveTouch,
    /// A whole batch landed in the dead zone
    AmbiguousBatch,
    /// A fully active batch arrived while the detector was armed
    GlanceDetected,
    /// The glance timeout fired
    TimeoutExpired,
}
