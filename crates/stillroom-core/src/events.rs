use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pattern::{BreathPattern, BreathPhase};
use crate::phase::VisualPhase;

/// Every observable state change in an active practice produces an Event.
/// The host (GUI or CLI) polls the session and renders from these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    SessionStopped {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        new_phase: VisualPhase,
        old_phase: VisualPhase,
        at: DateTime<Utc>,
    },
    CycleCompleted {
        cycle: u64,
        at: DateTime<Utc>,
    },
    /// One point on the breath stream, recomputed per external sample.
    BreathSampled {
        phase: BreathPhase,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// The effective pattern changed (capacity breakpoint or segment cap).
    PatternUpdated {
        pattern: BreathPattern,
        multiplier: f64,
        at: DateTime<Utc>,
    },
    TempoSessionStarted {
        track_secs: f64,
        bpm: f64,
        segment_beat_total: u64,
        at: DateTime<Utc>,
    },
    SegmentAdvanced {
        segment_index: usize,
        cap: f64,
        segment_beat_total: u64,
        at: DateTime<Utc>,
    },
    TempoSessionEnded {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: VisualPhase,
        phase_progress: f64,
        cycle_count: u64,
        elapsed_secs: f64,
        at: DateTime<Utc>,
    },
}
