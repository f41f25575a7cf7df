use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pattern::BreathPattern;

/// A user's measured maximum comfortable duration for each breath phase.
///
/// Owned by an external store; the engine only ever reads a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub inhale: f64,
    pub hold_in: f64,
    pub exhale: f64,
    pub hold_out: f64,
    pub measured_at: DateTime<Utc>,
}

impl Benchmark {
    pub fn new(inhale: f64, hold_in: f64, exhale: f64, hold_out: f64) -> Self {
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
            measured_at: Utc::now(),
        }
    }

    /// A benchmark is usable only when all four measurements are finite and
    /// strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.inhale, self.hold_in, self.exhale, self.hold_out]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }

    pub fn pattern(&self) -> BreathPattern {
        BreathPattern::new(self.inhale, self.hold_in, self.exhale, self.hold_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_positive_measurements_are_valid() {
        assert!(Benchmark::new(10.0, 5.0, 10.0, 5.0).is_valid());
    }

    #[test]
    fn zero_negative_or_nan_invalidates() {
        assert!(!Benchmark::new(10.0, 0.0, 10.0, 5.0).is_valid());
        assert!(!Benchmark::new(-1.0, 5.0, 10.0, 5.0).is_valid());
        assert!(!Benchmark::new(10.0, 5.0, f64::NAN, 5.0).is_valid());
    }
}
