use serde::{Deserialize, Serialize};

/// One of the four stages of a visualization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualPhase {
    FadeIn,
    Display,
    FadeOut,
    Void,
}

impl VisualPhase {
    /// The next phase in cyclic order.
    pub fn next(self) -> Self {
        match self {
            VisualPhase::FadeIn => VisualPhase::Display,
            VisualPhase::Display => VisualPhase::FadeOut,
            VisualPhase::FadeOut => VisualPhase::Void,
            VisualPhase::Void => VisualPhase::FadeIn,
        }
    }

    /// Whether completing this phase completes a cycle.
    pub fn is_last(self) -> bool {
        self == VisualPhase::Void
    }
}

/// Durations in seconds for the four visual phases.
///
/// The clock re-reads these on every tick, so a duration changed mid-phase
/// takes effect the next time that phase's length is checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub fade_in: f64,
    pub display: f64,
    pub fade_out: f64,
    pub void: f64,
}

impl PhaseDurations {
    pub fn new(fade_in: f64, display: f64, fade_out: f64, void: f64) -> Self {
        Self {
            fade_in,
            display,
            fade_out,
            void,
        }
    }

    pub fn for_phase(&self, phase: VisualPhase) -> f64 {
        match phase {
            VisualPhase::FadeIn => self.fade_in,
            VisualPhase::Display => self.display,
            VisualPhase::FadeOut => self.fade_out,
            VisualPhase::Void => self.void,
        }
    }

    pub fn cycle_secs(&self) -> f64 {
        self.fade_in + self.display + self.fade_out + self.void
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::new(2.0, 8.0, 2.0, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_cyclic() {
        let mut phase = VisualPhase::FadeIn;
        let seen: Vec<VisualPhase> = (0..4)
            .map(|_| {
                let p = phase;
                phase = phase.next();
                p
            })
            .collect();
        assert_eq!(
            seen,
            [
                VisualPhase::FadeIn,
                VisualPhase::Display,
                VisualPhase::FadeOut,
                VisualPhase::Void,
            ]
        );
        assert_eq!(phase, VisualPhase::FadeIn);
    }

    #[test]
    fn void_is_the_cycle_boundary() {
        assert!(VisualPhase::Void.is_last());
        assert!(!VisualPhase::Display.is_last());
    }

    #[test]
    fn cycle_secs_sums_all_phases() {
        let d = PhaseDurations::new(1.0, 2.0, 1.0, 2.0);
        assert_eq!(d.cycle_secs(), 6.0);
    }
}
