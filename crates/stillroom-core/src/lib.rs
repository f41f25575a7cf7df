//! # Stillroom Core Library
//!
//! This library provides the practice session timing and progression engine
//! for Stillroom, a guided breathing and visualization practice app. It
//! implements a CLI-first philosophy where every engine capability is
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Phase Clock**: A wall-clock-based state machine cycling a practice
//!   through four visual phases. The caller invokes `tick(now)` periodically
//!   with its own timestamps -- no internal threads, no drift accumulation.
//! - **Capacity Progression**: Scales a breath pattern's maxima by a
//!   session-position curve (50% at the start, landing at 100% over the
//!   final stretch), sourced from a measured benchmark or a manual pattern.
//! - **Tempo Sync**: Paces the same pattern against a backing audio track,
//!   in three equal segments with stepped capacity caps and beat tracking.
//! - **Session**: A single-owner lifecycle object composing the above and
//!   emitting [`Event`]s for a polling host.
//!
//! ## Key Components
//!
//! - [`PhaseClock`]: Drift-free visual phase state machine
//! - [`CapacityProgression`]: Benchmark-or-manual capacity scaling
//! - [`TempoSession`]: Three-segment track-synced schedule
//! - [`quantize`]: Musical beat-grid quantizer
//! - [`PracticeSession`]: Session lifecycle and event stream

pub mod capacity;
pub mod config;
pub mod error;
pub mod events;
pub mod pattern;
pub mod phase;
pub mod session;
pub mod tempo;

pub use capacity::{Benchmark, CapacityProgression, EffectivePattern};
pub use config::Config;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use pattern::{BreathPattern, BreathPhase, BreathSample};
pub use phase::{PhaseClock, PhaseDurations, PhaseTransition, VisualPhase};
pub use session::{Pacing, PracticeSession};
pub use tempo::{grid_secs, quantize, quantize_pattern, SegmentChange, TempoSession};
