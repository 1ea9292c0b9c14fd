//! Clock and one-shot timer traits

/// Opaque identifier for a scheduled timer
///
/// Issued by [`TimerService::schedule`]. The platform reports the same
/// handle back when the timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(pub u32);

/// What a timer was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    /// Glance timeout (Active -> TimedOut)
    GlanceTimeout,
    /// Backlight re-pulse tick
    LightFade,
}

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, never decreasing
    fn now_ms(&self) -> u64;
}

/// One-shot timer scheduling
///
/// When a timer expires the platform delivers its handle back to the
/// engine on the same event loop as sensor callbacks.
pub trait TimerService {
    /// Schedule a one-shot timer `delay_ms` from now
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle;

    /// Cancel a scheduled timer
    ///
    /// Must be a no-op if the handle already fired or was never valid.
    fn cancel(&mut self, handle: TimerHandle);
}
