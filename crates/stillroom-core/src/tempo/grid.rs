//! Musical beat-grid quantization.
//!
//! Durations synchronized to music are rounded down to a grid that is an
//! integer multiple (1-4) of one beat. Fast tempos group several beats
//! into one counting unit so the grid stays near one second; slow tempos
//! use the single beat as the unit.

use crate::pattern::BreathPattern;

/// The grid size in seconds for `bpm`, or `None` when the tempo is
/// unusable (non-finite or <= 0).
pub fn grid_secs(bpm: f64) -> Option<f64> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return None;
    }
    let beat = 60.0 / bpm;
    let k = (bpm / 60.0).round().clamp(1.0, 4.0);
    Some(k * beat)
}

/// Round `duration_secs` down to the beat grid for `bpm`.
///
/// An unusable tempo is a no-op. The result is always a positive integer
/// multiple of the grid; an input shorter than one grid unit is pulled up
/// to a single grid unit, otherwise the result never exceeds the input.
pub fn quantize(duration_secs: f64, bpm: f64) -> f64 {
    match grid_secs(bpm) {
        Some(grid) => (duration_secs / grid).floor().max(1.0) * grid,
        None => duration_secs,
    }
}

/// Quantize each of a pattern's four phases independently.
pub fn quantize_pattern(pattern: BreathPattern, bpm: f64) -> BreathPattern {
    pattern.map(|d| quantize(d, bpm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_bpm_uses_a_one_second_grid() {
        assert_eq!(grid_secs(60.0), Some(1.0));
        assert_eq!(quantize(7.0, 60.0), 7.0);
        assert_eq!(quantize(7.3, 60.0), 7.0);
    }

    #[test]
    fn fast_tempo_groups_up_to_four_beats() {
        // 300 bpm: beat 0.2 s, k clamps at 4, grid 0.8 s.
        assert_eq!(grid_secs(300.0), Some(0.8));
        assert!((quantize(7.0, 300.0) - 6.4).abs() < 1e-12);
    }

    #[test]
    fn slow_tempo_uses_the_single_beat() {
        // 40 bpm: beat 1.5 s, k rounds to 1.
        assert_eq!(grid_secs(40.0), Some(1.5));
        assert_eq!(quantize(5.0, 40.0), 4.5);
    }

    #[test]
    fn unusable_tempo_is_a_noop() {
        assert_eq!(quantize(7.3, 0.0), 7.3);
        assert_eq!(quantize(7.3, -10.0), 7.3);
        assert_eq!(quantize(7.3, f64::NAN), 7.3);
        assert_eq!(quantize(7.3, f64::INFINITY), 7.3);
    }

    #[test]
    fn short_input_pulls_up_to_one_grid_unit() {
        // 0.4 s against a 1 s grid lands on one full grid unit.
        assert_eq!(quantize(0.4, 60.0), 1.0);
    }

    #[test]
    fn result_is_a_grid_multiple() {
        for bpm in [40.0, 60.0, 90.0, 120.0, 180.0, 300.0] {
            let grid = grid_secs(bpm).unwrap();
            for d in [1.0, 2.7, 5.0, 9.9, 30.0] {
                let q = quantize(d, bpm);
                let steps = q / grid;
                assert!((steps - steps.round()).abs() < 1e-9, "bpm {bpm} d {d}");
                assert!(q > 0.0);
            }
        }
    }
}
