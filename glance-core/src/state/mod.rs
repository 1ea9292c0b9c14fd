//! Glance state machine
//!
//! Three states, four events. Transitions are explicit and deterministic;
//! the engine suppresses re-entry of the current state.

pub mod events;
pub mod machine;

pub use events::GlanceEvent;
pub use machine::GlanceState;
