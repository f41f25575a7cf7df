//! Tempo-synced segment schedule.
//!
//! When a backing audio track of known length paces a breath practice, the
//! track is divided into three equal segments with stepped capacity caps.
//! The host's audio clock is authoritative for elapsed time and may report
//! at any cadence; beat pulses arrive as discrete, possibly bursty events.

use serde::{Deserialize, Serialize};

use crate::pattern::BreathPattern;

/// Capacity caps applied across the three equal thirds of the track.
pub const SEGMENT_CAPS: [f64; 3] = [0.5, 0.75, 0.9];

/// Raised when elapsed time crosses into a new segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentChange {
    pub segment_index: usize,
    pub cap: f64,
    pub segment_beat_total: u64,
}

/// One track-synced pacing session.
///
/// Created inactive; `start_session` arms it, `end_session` returns it to
/// the inactive baseline and is safe to call redundantly. The segment
/// index is a non-decreasing step function of elapsed time for the
/// lifetime of one session -- only a fresh `start_session` resets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoSession {
    active: bool,
    track_secs: f64,
    segment_secs: f64,
    segment_index: usize,
    cap: f64,
    segment_elapsed_secs: f64,
    /// Beats detected in the current segment. Informational only: never
    /// clamped to `segment_beat_total`, overshoot is expected.
    beat_count: u64,
    /// Beats one segment is expected to contain at the session's tempo.
    segment_beat_total: u64,
    max: BreathPattern,
    effective: BreathPattern,
}

fn beat_total(segment_secs: f64, bpm: f64) -> u64 {
    if !bpm.is_finite() || bpm <= 0.0 || !segment_secs.is_finite() {
        return 1;
    }
    (segment_secs * bpm / 60.0).round().max(1.0) as u64
}

impl TempoSession {
    pub fn new() -> Self {
        Self {
            active: false,
            track_secs: 0.0,
            segment_secs: 0.0,
            segment_index: 0,
            cap: SEGMENT_CAPS[0],
            segment_elapsed_secs: 0.0,
            beat_count: 0,
            segment_beat_total: 0,
            max: BreathPattern::new(0.0, 0.0, 0.0, 0.0),
            effective: BreathPattern::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn track_secs(&self) -> f64 {
        self.track_secs
    }

    /// Current segment index (0, 1, or 2).
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn cap(&self) -> f64 {
        self.cap
    }

    pub fn segment_elapsed_secs(&self) -> f64 {
        self.segment_elapsed_secs
    }

    pub fn beat_count(&self) -> u64 {
        self.beat_count
    }

    pub fn segment_beat_total(&self) -> u64 {
        self.segment_beat_total
    }

    /// The capped pattern currently in force.
    pub fn effective(&self) -> BreathPattern {
        self.effective
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the schedule for a track of `track_secs` at `bpm`, pacing
    /// `max` (the benchmark maxima).
    ///
    /// Segment 0 starts immediately at cap 0.5. A degenerate track length
    /// (zero, negative, or non-finite) leaves the segment length at zero;
    /// the first elapsed update then clamps straight to the last segment.
    pub fn start_session(&mut self, track_secs: f64, max: BreathPattern, bpm: f64) {
        *self = Self::new();
        self.active = true;
        self.track_secs = track_secs;
        self.segment_secs = if track_secs.is_finite() && track_secs > 0.0 {
            track_secs / 3.0
        } else {
            0.0
        };
        self.segment_beat_total = beat_total(self.segment_secs, bpm);
        self.max = max;
        self.effective = max.scaled(self.cap);
    }

    /// Feed the authoritative track position.
    ///
    /// Cheap when the segment is unchanged; on a segment crossing the cap,
    /// effective pattern, and expected beat total are recomputed and the
    /// beat counter resets. The index clamps to 2 on track overrun and
    /// never moves backward within one session, even if the audio clock
    /// reports a smaller elapsed time than before.
    pub fn update_elapsed(&mut self, total_elapsed_secs: f64, bpm: f64) -> Option<SegmentChange> {
        if !self.active {
            return None;
        }
        // A NaN sample from the audio clock carries no position at all:
        // ignore it rather than letting it move the monotone index.
        if total_elapsed_secs.is_nan() {
            return None;
        }
        let computed = if self.segment_secs > 0.0 {
            let raw = (total_elapsed_secs / self.segment_secs).floor();
            if raw > 0.0 {
                raw.min(2.0) as usize
            } else {
                0
            }
        } else {
            2
        };
        let index = computed.max(self.segment_index);
        self.segment_elapsed_secs =
            (total_elapsed_secs - index as f64 * self.segment_secs).max(0.0);
        if index == self.segment_index {
            return None;
        }
        self.segment_index = index;
        self.cap = SEGMENT_CAPS[index];
        self.effective = self.max.scaled(self.cap);
        self.segment_beat_total = beat_total(self.segment_secs, bpm);
        self.beat_count = 0;
        Some(SegmentChange {
            segment_index: index,
            cap: self.cap,
            segment_beat_total: self.segment_beat_total,
        })
    }

    /// Record one detected beat; returns the new per-segment count.
    pub fn increment_beat_count(&mut self) -> u64 {
        if self.active {
            self.beat_count += 1;
        }
        self.beat_count
    }

    /// Return to the inactive baseline. Idempotent.
    pub fn end_session(&mut self) {
        *self = Self::new();
    }
}

impl Default for TempoSession {
    fn default() -> Self {
        Self::new()
    }
}
