//! Glance state definition
//!
//! The externally visible state is a pure function of the previous state
//! and an event. The engine decides which event applies; this table decides
//! where it leads.

use super::events::GlanceEvent;

/// Glance states reported to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlanceState {
    /// Not looking at the watch (initial state)
    #[default]
    Inactive,
    /// Watch raised toward the face
    Active,
    /// Still raised, but the glance timeout has elapsed
    TimedOut,
}

impl GlanceState {
    /// Check if the wearer is currently glancing
    pub fn is_glancing(&self) -> bool {
        matches!(self, GlanceState::Active)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: GlanceEvent) -> Self {
        use GlanceEvent::*;
        use GlanceState::*;

        match (self, event) {
            // Any inactive-zone contact or dead-zone batch ends a glance
            (_, InactiveTouch) => Inactive,
            (_, AmbiguousBatch) => Inactive,

            // Activation
            (_, GlanceDetected) => Active,

            // The timeout is only ever pending while Active, but expiry is
            // unconditional by contract
            (_, TimeoutExpired) => TimedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GlanceState; 3] = [GlanceState::Inactive, GlanceState::Active, GlanceState::TimedOut];

    #[test]
    fn test_initial_state() {
        assert_eq!(GlanceState::default(), GlanceState::Inactive);
    }

    #[test]
    fn test_glance_flow() {
        let state = GlanceState::Inactive;

        let active = state.transition(GlanceEvent::GlanceDetected);
        assert_eq!(active, GlanceState::Active);

        let timed_out = active.transition(GlanceEvent::TimeoutExpired);
        assert_eq!(timed_out, GlanceState::TimedOut);

        let inactive = timed_out.transition(GlanceEvent::InactiveTouch);
        assert_eq!(inactive, GlanceState::Inactive);
    }

    #[test]
    fn test_inactive_from_any_state() {
        for state in ALL {
            assert_eq!(state.transition(GlanceEvent::InactiveTouch), GlanceState::Inactive);
            assert_eq!(state.transition(GlanceEvent::AmbiguousBatch), GlanceState::Inactive);
        }
    }

    #[test]
    fn test_is_glancing() {
        assert!(GlanceState::Active.is_glancing());
        assert!(!GlanceState::TimedOut.is_glancing());
        assert!(!GlanceState::Inactive.is_glancing());
    }
}
