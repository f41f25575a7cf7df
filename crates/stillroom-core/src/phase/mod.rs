mod clock;
mod durations;

pub use clock::{PhaseClock, PhaseTransition};
pub use durations::{PhaseDurations, VisualPhase};
