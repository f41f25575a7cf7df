//! Capacity progression: scales a breath pattern's maxima over the
//! lifetime of a session.
//!
//! The multiplier is a step curve over normalized session position --
//! 50% for the first third, 75% for the second, 90% until near the end,
//! then a linear ramp landing at 100% as the session closes. The maxima
//! come from a measured benchmark when one is valid, otherwise from the
//! caller's manually configured pattern. Note that a manual pattern is
//! scaled exactly like a benchmark: a session starts at half the entered
//! values, not at the entered values verbatim.
//!
//! Recomputation is cheap and driven by coarse periodic sampling (500 ms
//! is plenty; the curve only moves at its breakpoints).

use serde::{Deserialize, Serialize};

use super::benchmark::Benchmark;
use crate::pattern::BreathPattern;
use crate::tempo::quantize_pattern;

/// Normalized session position at which the final ramp to 100% begins.
const RAMP_START: f64 = 0.92;

/// Minimum length in seconds for the active phases (inhale, exhale).
const MIN_ACTIVE_SECS: f64 = 1.0;

/// Capacity multiplier at normalized session position `norm`.
///
/// Non-decreasing over [0, 1] with `multiplier(0) = 0.5` and
/// `multiplier(1) = 1.0`. Out-of-range or non-finite input is clamped
/// into [0, 1] (NaN maps to 0).
pub fn multiplier(norm: f64) -> f64 {
    let norm = if norm.is_finite() {
        norm.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if norm < 1.0 / 3.0 {
        0.5
    } else if norm < 2.0 / 3.0 {
        0.75
    } else if norm < RAMP_START {
        0.90
    } else {
        0.90 + 0.10 * ((norm - RAMP_START) / (1.0 - RAMP_START))
    }
}

/// Round to the nearest half second.
fn round_half(secs: f64) -> f64 {
    (secs * 2.0).round() / 2.0
}

/// The pattern currently in force, with the multiplier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivePattern {
    pub pattern: BreathPattern,
    pub multiplier: f64,
}

/// Session-scoped capacity scaling of a breath pattern.
///
/// Holds the inputs that stay fixed for a session (maxima source, planned
/// length, optional tempo); [`CapacityProgression::effective_at`] derives
/// the pattern for any elapsed time. Only used when no tempo-synced
/// schedule is pacing the session -- the two sources are mutually
/// exclusive (see [`crate::session::Pacing`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityProgression {
    /// Measured benchmark, if the user has taken one.
    pub benchmark: Option<Benchmark>,
    /// Manually configured pattern, the fallback maxima source.
    pub manual: BreathPattern,
    /// Total planned session duration in seconds.
    pub total_secs: f64,
    /// When known, the effective pattern is snapped to the musical grid.
    pub bpm: Option<f64>,
}

impl CapacityProgression {
    pub fn new(benchmark: Option<Benchmark>, manual: BreathPattern, total_secs: f64) -> Self {
        Self {
            benchmark,
            manual,
            total_secs,
            bpm: None,
        }
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = Some(bpm);
        self
    }

    /// The maxima being scaled: the benchmark when valid, else the manual
    /// pattern.
    pub fn max_pattern(&self) -> BreathPattern {
        match &self.benchmark {
            Some(b) if b.is_valid() => b.pattern(),
            _ => self.manual,
        }
    }

    /// Normalized session position for `elapsed_secs`.
    ///
    /// A zero, negative, or non-finite total yields 0 (multiplier 0.5)
    /// rather than NaN.
    pub fn normalized(&self, elapsed_secs: f64) -> f64 {
        if self.total_secs > 0.0 && self.total_secs.is_finite() && elapsed_secs.is_finite() {
            (elapsed_secs / self.total_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// The effective pattern at `elapsed_secs` into the session.
    ///
    /// Each maximum is scaled by the capacity multiplier, rounded to the
    /// nearest half second, and floor-clamped: active phases to 1 s, holds
    /// to 0 s. With a known tempo the result is additionally snapped to
    /// the beat grid.
    pub fn effective_at(&self, elapsed_secs: f64) -> EffectivePattern {
        let m = multiplier(self.normalized(elapsed_secs));
        let scaled = self.max_pattern().scaled(m);
        let mut pattern = BreathPattern {
            inhale: round_half(scaled.inhale).max(MIN_ACTIVE_SECS),
            hold_in: round_half(scaled.hold_in).max(0.0),
            exhale: round_half(scaled.exhale).max(MIN_ACTIVE_SECS),
            hold_out: round_half(scaled.hold_out).max(0.0),
        };
        if let Some(bpm) = self.bpm {
            pattern = quantize_pattern(pattern, bpm);
        }
        EffectivePattern {
            pattern,
            multiplier: m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_boundary_values() {
        assert_eq!(multiplier(0.0), 0.5);
        assert_eq!(multiplier(1.0 / 3.0), 0.75);
        assert_eq!(multiplier(2.0 / 3.0), 0.90);
        assert!((multiplier(0.92) - 0.90).abs() < 1e-12);
        assert!((multiplier(0.96) - 0.95).abs() < 1e-12);
        assert_eq!(multiplier(1.0), 1.0);
    }

    #[test]
    fn curve_clamps_degenerate_input() {
        assert_eq!(multiplier(-3.0), 0.5);
        assert_eq!(multiplier(7.0), 1.0);
        assert_eq!(multiplier(f64::NAN), 0.5);
    }

    #[test]
    fn benchmark_scaled_early_in_session() {
        // benchmark {10, 5, 10, 5}, 600 s session, 60 s elapsed: norm 0.1.
        let prog = CapacityProgression::new(
            Some(Benchmark::new(10.0, 5.0, 10.0, 5.0)),
            BreathPattern::new(4.0, 4.0, 6.0, 2.0),
            600.0,
        );
        let eff = prog.effective_at(60.0);
        assert_eq!(eff.multiplier, 0.5);
        assert_eq!(eff.pattern, BreathPattern::new(5.0, 2.5, 5.0, 2.5));
    }

    #[test]
    fn invalid_benchmark_falls_back_to_manual() {
        let prog = CapacityProgression::new(
            Some(Benchmark::new(10.0, 0.0, 10.0, 5.0)),
            BreathPattern::new(8.0, 4.0, 8.0, 4.0),
            600.0,
        );
        assert_eq!(prog.max_pattern(), BreathPattern::new(8.0, 4.0, 8.0, 4.0));
    }

    #[test]
    fn manual_pattern_is_scaled_like_a_benchmark() {
        // A manually entered pattern is not used verbatim: it starts at 50%.
        let prog =
            CapacityProgression::new(None, BreathPattern::new(8.0, 4.0, 8.0, 4.0), 600.0);
        let eff = prog.effective_at(0.0);
        assert_eq!(eff.pattern, BreathPattern::new(4.0, 2.0, 4.0, 2.0));
    }

    #[test]
    fn active_phases_floor_at_one_second() {
        let prog =
            CapacityProgression::new(None, BreathPattern::new(1.0, 0.2, 1.0, 0.2), 600.0);
        let eff = prog.effective_at(0.0);
        // 1.0 * 0.5 rounds to 0.5, clamped up to the 1 s active floor.
        assert_eq!(eff.pattern.inhale, 1.0);
        assert_eq!(eff.pattern.exhale, 1.0);
        // Holds may quantize all the way to zero: 0.2 * 0.5 rounds to 0.
        assert_eq!(eff.pattern.hold_in, 0.0);
        assert_eq!(eff.pattern.hold_out, 0.0);
    }

    #[test]
    fn half_second_rounding_resolves_ties_upward() {
        // 0.5 * 0.5 sits exactly between 0 and 0.5; ties round away from
        // zero, so the holds land on 0.5.
        let prog =
            CapacityProgression::new(None, BreathPattern::new(1.0, 0.5, 1.0, 0.5), 600.0);
        let eff = prog.effective_at(0.0);
        assert_eq!(eff.pattern.hold_in, 0.5);
        assert_eq!(eff.pattern.hold_out, 0.5);
    }

    #[test]
    fn zero_total_session_stays_at_half_capacity() {
        let prog = CapacityProgression::new(None, BreathPattern::new(8.0, 4.0, 8.0, 4.0), 0.0);
        assert_eq!(prog.effective_at(120.0).multiplier, 0.5);
    }

    #[test]
    fn end_of_session_reaches_full_capacity() {
        let prog =
            CapacityProgression::new(None, BreathPattern::new(8.0, 4.0, 8.0, 4.0), 600.0);
        let eff = prog.effective_at(600.0);
        assert_eq!(eff.multiplier, 1.0);
        assert_eq!(eff.pattern, BreathPattern::new(8.0, 4.0, 8.0, 4.0));
    }

    #[test]
    fn known_tempo_snaps_to_the_beat_grid() {
        let prog = CapacityProgression::new(
            Some(Benchmark::new(10.0, 5.0, 10.0, 5.0)),
            BreathPattern::new(4.0, 4.0, 6.0, 2.0),
            600.0,
        )
        .with_bpm(40.0);
        // Multiplier 0.5 gives {5, 2.5, 5, 2.5}; a 40 bpm grid is 1.5 s.
        let eff = prog.effective_at(0.0);
        assert_eq!(eff.pattern, BreathPattern::new(4.5, 1.5, 4.5, 1.5));
    }
}
