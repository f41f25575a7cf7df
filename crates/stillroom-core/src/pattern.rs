//! Breath pattern primitives shared by the capacity and tempo pacers.

use serde::{Deserialize, Serialize};

/// One of the four stages of a breath cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    Inhale,
    HoldTop,
    Exhale,
    HoldBottom,
}

/// Four named durations in seconds describing one breath cycle.
///
/// Used both for maxima (a measured benchmark or a manually entered pattern)
/// and for the effective scaled pattern handed to a pacing renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathPattern {
    pub inhale: f64,
    pub hold_in: f64,
    pub exhale: f64,
    pub hold_out: f64,
}

/// A point on the breath stream: which phase is in force and how far along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathSample {
    pub phase: BreathPhase,
    /// 0.0 .. 1.0 progress within the current phase.
    pub progress: f64,
}

impl BreathPattern {
    pub fn new(inhale: f64, hold_in: f64, exhale: f64, hold_out: f64) -> Self {
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
        }
    }

    /// Total length of one cycle in seconds.
    pub fn cycle_secs(&self) -> f64 {
        self.inhale + self.hold_in + self.exhale + self.hold_out
    }

    /// Multiply all four durations by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|d| d * factor)
    }

    /// Apply `f` to each of the four durations.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            inhale: f(self.inhale),
            hold_in: f(self.hold_in),
            exhale: f(self.exhale),
            hold_out: f(self.hold_out),
        }
    }

    /// Phases in cycle order with their durations.
    pub fn phases(&self) -> [(BreathPhase, f64); 4] {
        [
            (BreathPhase::Inhale, self.inhale),
            (BreathPhase::HoldTop, self.hold_in),
            (BreathPhase::Exhale, self.exhale),
            (BreathPhase::HoldBottom, self.hold_out),
        ]
    }

    /// Locate `cycle_elapsed` seconds within the repeating cycle.
    ///
    /// Zero-length phases are skipped. A pattern whose cycle length is zero
    /// (or negative, possible only with degenerate input) pins the stream to
    /// the start of the inhale rather than dividing by zero.
    pub fn sample(&self, cycle_elapsed: f64) -> BreathSample {
        let total = self.cycle_secs();
        if !(total > 0.0) || !cycle_elapsed.is_finite() {
            return BreathSample {
                phase: BreathPhase::Inhale,
                progress: 0.0,
            };
        }
        let t = cycle_elapsed.rem_euclid(total);
        let mut acc = 0.0;
        for (phase, dur) in self.phases() {
            if dur > 0.0 && t < acc + dur {
                return BreathSample {
                    phase,
                    progress: ((t - acc) / dur).clamp(0.0, 1.0),
                };
            }
            acc += dur.max(0.0);
        }
        // Floating-point tail of the cycle.
        BreathSample {
            phase: BreathPhase::HoldBottom,
            progress: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> BreathPattern {
        BreathPattern::new(4.0, 4.0, 6.0, 2.0)
    }

    #[test]
    fn sample_walks_phases_in_order() {
        let p = pattern();
        assert_eq!(p.sample(0.0).phase, BreathPhase::Inhale);
        assert_eq!(p.sample(3.9).phase, BreathPhase::Inhale);
        assert_eq!(p.sample(4.0).phase, BreathPhase::HoldTop);
        assert_eq!(p.sample(8.0).phase, BreathPhase::Exhale);
        assert_eq!(p.sample(14.0).phase, BreathPhase::HoldBottom);
    }

    #[test]
    fn sample_wraps_around_the_cycle() {
        let p = pattern();
        // 16 s cycle, so 17 s lands 1 s into the next inhale.
        let s = p.sample(17.0);
        assert_eq!(s.phase, BreathPhase::Inhale);
        assert!((s.progress - 0.25).abs() < 1e-9);
    }

    #[test]
    fn sample_skips_zero_length_holds() {
        let p = BreathPattern::new(4.0, 0.0, 6.0, 0.0);
        assert_eq!(p.sample(4.0).phase, BreathPhase::Exhale);
        assert_eq!(p.sample(9.9).phase, BreathPhase::Exhale);
        assert_eq!(p.sample(10.0).phase, BreathPhase::Inhale);
    }

    #[test]
    fn zero_cycle_pattern_pins_to_inhale() {
        let p = BreathPattern::new(0.0, 0.0, 0.0, 0.0);
        let s = p.sample(12.3);
        assert_eq!(s.phase, BreathPhase::Inhale);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn progress_is_fraction_of_phase() {
        let p = pattern();
        let s = p.sample(2.0);
        assert_eq!(s.phase, BreathPhase::Inhale);
        assert!((s.progress - 0.5).abs() < 1e-9);
    }
}
