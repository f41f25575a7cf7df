//! Practice session lifecycle.
//!
//! A [`PracticeSession`] is the single owner of one practice's timing
//! state: one phase clock plus, for breathing practices, exactly one
//! pacing source. The mutual exclusion between the capacity curve and a
//! tempo-synced schedule is carried by the [`Pacing`] enum -- a session
//! cannot hold both.
//!
//! The host drives the session with its own timestamps (`tick`, `sample`,
//! `track_elapsed`) and polls the returned [`Event`]s; the session never
//! reads the system clock for timing decisions, only for stamping events.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capacity::CapacityProgression;
use crate::events::Event;
use crate::pattern::BreathPattern;
use crate::phase::{PhaseClock, PhaseDurations};
use crate::tempo::TempoSession;

/// What paces a session's breath pattern, if anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Pacing {
    /// Visualization-only practice: the phase clock alone drives rendering.
    PhaseOnly,
    /// Breath practice scaled by the session-position capacity curve.
    Capacity(CapacityProgression),
    /// Breath practice synced to a backing track.
    Tempo {
        session: TempoSession,
        track_secs: f64,
        bpm: f64,
        maxima: BreathPattern,
    },
}

/// Single-owner state for one active practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    id: Uuid,
    durations: PhaseDurations,
    clock: PhaseClock,
    pacing: Pacing,
    /// Timestamp of the first tick or sample; anchors breath elapsed time.
    #[serde(default)]
    started_at: Option<f64>,
    /// Last effective pattern emitted, for change detection.
    #[serde(default)]
    last_pattern: Option<BreathPattern>,
}

impl PracticeSession {
    /// A visualization practice: phase clock only.
    pub fn visualization(durations: PhaseDurations) -> Self {
        Self::with_pacing(durations, Pacing::PhaseOnly)
    }

    /// A breathing practice paced by the capacity curve.
    pub fn breathing(durations: PhaseDurations, progression: CapacityProgression) -> Self {
        Self::with_pacing(durations, Pacing::Capacity(progression))
    }

    /// A breathing practice paced by a backing track.
    pub fn tempo_synced(
        durations: PhaseDurations,
        track_secs: f64,
        bpm: f64,
        maxima: BreathPattern,
    ) -> Self {
        Self::with_pacing(
            durations,
            Pacing::Tempo {
                session: TempoSession::new(),
                track_secs,
                bpm,
                maxima,
            },
        )
    }

    fn with_pacing(durations: PhaseDurations, pacing: Pacing) -> Self {
        Self {
            id: Uuid::new_v4(),
            durations,
            clock: PhaseClock::new(),
            pacing,
            started_at: None,
            last_pattern: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.clock.is_active()
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// Live reconfiguration: applies on the next tick, mid-phase included.
    pub fn durations_mut(&mut self) -> &mut PhaseDurations {
        &mut self.durations
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.clock.phase(),
            phase_progress: self.clock.progress(),
            cycle_count: self.clock.cycle_count(),
            elapsed_secs: self.clock.elapsed_secs(),
            at: Utc::now(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Begin the session. A no-op when already running.
    pub fn start(&mut self) -> Vec<Event> {
        if !self.clock.start() {
            return Vec::new();
        }
        self.started_at = None;
        self.last_pattern = None;
        let mut events = vec![Event::SessionStarted {
            session_id: self.id,
            at: Utc::now(),
        }];
        if let Pacing::Tempo {
            session,
            track_secs,
            bpm,
            maxima,
        } = &mut self.pacing
        {
            session.start_session(*track_secs, *maxima, *bpm);
            events.push(Event::TempoSessionStarted {
                track_secs: *track_secs,
                bpm: *bpm,
                segment_beat_total: session.segment_beat_total(),
                at: Utc::now(),
            });
        }
        events
    }

    /// End the session, freezing the clock. Idempotent.
    pub fn stop(&mut self) -> Vec<Event> {
        if !self.clock.is_active() {
            return Vec::new();
        }
        self.clock.stop();
        let mut events = vec![Event::SessionStopped {
            session_id: self.id,
            at: Utc::now(),
        }];
        if let Pacing::Tempo { session, .. } = &mut self.pacing {
            session.end_session();
            events.push(Event::TempoSessionEnded { at: Utc::now() });
        }
        events
    }

    /// Advance the phase clock to `now_secs` (host tick cadence).
    pub fn tick(&mut self, now_secs: f64) -> Vec<Event> {
        if !self.clock.is_active() {
            return Vec::new();
        }
        self.started_at.get_or_insert(now_secs);
        let mut events = Vec::new();
        if let Some(transition) = self.clock.tick(now_secs, &self.durations) {
            events.push(Event::PhaseChanged {
                new_phase: transition.to,
                old_phase: transition.from,
                at: Utc::now(),
            });
            if let Some(cycle) = transition.completed_cycle {
                events.push(Event::CycleCompleted {
                    cycle,
                    at: Utc::now(),
                });
            }
        }
        events
    }

    /// Sample the breath stream at `now_secs` (coarse host cadence).
    ///
    /// Only meaningful for capacity-paced sessions; tempo-paced sessions
    /// sample through [`PracticeSession::track_elapsed`] instead.
    pub fn sample(&mut self, now_secs: f64) -> Vec<Event> {
        if !self.clock.is_active() {
            return Vec::new();
        }
        let started = *self.started_at.get_or_insert(now_secs);
        let elapsed = (now_secs - started).max(0.0);
        let Pacing::Capacity(progression) = &self.pacing else {
            return Vec::new();
        };
        let effective = progression.effective_at(elapsed);
        let mut events = Vec::new();
        if self.last_pattern != Some(effective.pattern) {
            self.last_pattern = Some(effective.pattern);
            events.push(Event::PatternUpdated {
                pattern: effective.pattern,
                multiplier: effective.multiplier,
                at: Utc::now(),
            });
        }
        let sample = effective.pattern.sample(elapsed);
        events.push(Event::BreathSampled {
            phase: sample.phase,
            progress: sample.progress,
            at: Utc::now(),
        });
        events
    }

    /// Feed the authoritative audio clock position for tempo pacing.
    pub fn track_elapsed(&mut self, total_elapsed_secs: f64) -> Vec<Event> {
        if !self.clock.is_active() {
            return Vec::new();
        }
        let Pacing::Tempo { session, bpm, .. } = &mut self.pacing else {
            return Vec::new();
        };
        let mut events = Vec::new();
        if let Some(change) = session.update_elapsed(total_elapsed_secs, *bpm) {
            events.push(Event::SegmentAdvanced {
                segment_index: change.segment_index,
                cap: change.cap,
                segment_beat_total: change.segment_beat_total,
                at: Utc::now(),
            });
            events.push(Event::PatternUpdated {
                pattern: session.effective(),
                multiplier: change.cap,
                at: Utc::now(),
            });
        }
        let sample = session.effective().sample(total_elapsed_secs);
        events.push(Event::BreathSampled {
            phase: sample.phase,
            progress: sample.progress,
            at: Utc::now(),
        });
        events
    }

    /// Relay one detected beat to a tempo-paced session.
    pub fn beat(&mut self) -> u64 {
        match &mut self.pacing {
            Pacing::Tempo { session, .. } => session.increment_beat_count(),
            _ => 0,
        }
    }
}
