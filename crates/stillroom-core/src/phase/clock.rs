//! Visual phase clock implementation.
//!
//! The phase clock is a wall-clock-based state machine. It does not use
//! internal threads or timers - the caller is responsible for calling
//! `tick(now)` periodically with timestamps from its own clock (a frame
//! callback, a test harness, anything monotonic).
//!
//! Transitions are computed from absolute timestamps, never from
//! accumulated deltas, so the clock cannot drift no matter how irregular
//! the tick cadence is. At most one transition is applied per tick: if a
//! tick arrives late enough to span several phases, the next overdue
//! transition is applied on the next tick rather than "catching up" inside
//! one call. A phase shorter than the tick cadence may therefore never be
//! visibly observed in-progress; callers needing guaranteed visibility of
//! every phase must tick finer than the shortest configured duration.
//!
//! ## Usage
//!
//! ```ignore
//! let mut clock = PhaseClock::new();
//! clock.start();
//! // In a loop:
//! if let Some(transition) = clock.tick(now_secs, &durations) { ... }
//! ```

use rand::Rng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::durations::{PhaseDurations, VisualPhase};

/// Result of a tick that crossed a phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: VisualPhase,
    pub to: VisualPhase,
    /// Set when the outgoing phase closed a full cycle; carries the new
    /// completed-cycle count.
    pub completed_cycle: Option<u64>,
}

/// Drift-free four-phase cycle state machine.
///
/// Operates on caller-supplied timestamps in seconds -- no internal thread,
/// no reads of the system clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseClock {
    active: bool,
    phase: VisualPhase,
    /// Timestamp of the first tick after `start()`; all elapsed time is
    /// measured from here.
    #[serde(default)]
    session_start: Option<f64>,
    /// Timestamp at which the current phase began.
    #[serde(default)]
    phase_start: Option<f64>,
    elapsed_secs: f64,
    progress: f64,
    cycle_count: u64,
    /// Per-session seed for downstream procedural rendering. Opaque to the
    /// clock itself.
    seed: u64,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self {
            active: false,
            phase: VisualPhase::FadeIn,
            session_start: None,
            phase_start: None,
            elapsed_secs: 0.0,
            progress: 0.0,
            cycle_count: 0,
            seed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> VisualPhase {
        self.phase
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Seconds since the first tick of this session.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A deterministic generator for this session's procedural rendering.
    pub fn rng(&self) -> Mcg128Xsl64 {
        Mcg128Xsl64::new(self.seed as u128)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Reset all fields and begin receiving ticks.
    ///
    /// A no-op when already running; returns whether a fresh session was
    /// actually started.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.phase = VisualPhase::FadeIn;
        self.session_start = None;
        self.phase_start = None;
        self.elapsed_secs = 0.0;
        self.progress = 0.0;
        self.cycle_count = 0;
        self.seed = rand::thread_rng().gen();
        true
    }

    /// Halt tick reception, freezing the last observed state.
    ///
    /// Safe to call redundantly or before `start()`.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance the clock to `now_secs`.
    ///
    /// The first tick after `start()` anchors the session and phase start
    /// to `now_secs`. Returns a transition when the current phase's
    /// duration (re-read from `durations` on every call) has fully
    /// elapsed. A zero or negative duration is treated as instantly due:
    /// it transitions on the next tick without dividing by zero.
    pub fn tick(&mut self, now_secs: f64, durations: &PhaseDurations) -> Option<PhaseTransition> {
        if !self.active {
            return None;
        }
        let session_start = *self.session_start.get_or_insert(now_secs);
        let phase_start = *self.phase_start.get_or_insert(now_secs);
        self.elapsed_secs = (now_secs - session_start).max(0.0);

        let duration = durations.for_phase(self.phase);
        let phase_elapsed = (now_secs - phase_start).max(0.0);
        self.progress = if duration > 0.0 {
            (phase_elapsed / duration).min(1.0)
        } else {
            1.0
        };

        if phase_elapsed >= duration {
            let from = self.phase;
            self.phase = from.next();
            self.phase_start = Some(now_secs);
            self.progress = 0.0;
            let completed_cycle = if from.is_last() {
                self.cycle_count += 1;
                Some(self.cycle_count)
            } else {
                None
            };
            return Some(PhaseTransition {
                from,
                to: self.phase,
                completed_cycle,
            });
        }
        None
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new()
    }
}
