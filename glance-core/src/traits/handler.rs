//! Glance state subscriber

use crate::state::GlanceState;

/// Receives glance state changes
///
/// Called exactly once per state change, never for a repeated state.
pub trait GlanceHandler {
    fn on_glance_state(&mut self, state: GlanceState);
}

impl<F: FnMut(GlanceState)> GlanceHandler for F {
    fn on_glance_state(&mut self, state: GlanceState) {
        self(state)
    }
}
