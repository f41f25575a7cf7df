//! TOML-based application configuration.
//!
//! Stores user preferences for practice sessions:
//! - Default visual phase durations
//! - The manually configured breath pattern (fallback maxima when no
//!   benchmark has been measured)
//! - Planned session length and the capacity resample interval
//! - An optional default tempo
//!
//! Configuration is stored at `~/.config/stillroom/config.toml`. The
//! engine itself never touches this file; hosts load it and hand the
//! values in as plain data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, ValidationError};
use crate::pattern::BreathPattern;
use crate::phase::PhaseDurations;

fn default_fade_in() -> f64 {
    2.0
}
fn default_display() -> f64 {
    8.0
}
fn default_fade_out() -> f64 {
    2.0
}
fn default_void() -> f64 {
    4.0
}
fn default_inhale() -> f64 {
    4.0
}
fn default_hold_in() -> f64 {
    4.0
}
fn default_exhale() -> f64 {
    6.0
}
fn default_hold_out() -> f64 {
    2.0
}
fn default_planned_secs() -> f64 {
    600.0
}
fn default_resample_ms() -> u64 {
    500
}

/// Visual phase duration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseConfig {
    #[serde(default = "default_fade_in")]
    pub fade_in: f64,
    #[serde(default = "default_display")]
    pub display: f64,
    #[serde(default = "default_fade_out")]
    pub fade_out: f64,
    #[serde(default = "default_void")]
    pub void: f64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            fade_in: default_fade_in(),
            display: default_display(),
            fade_out: default_fade_out(),
            void: default_void(),
        }
    }
}

impl PhaseConfig {
    pub fn durations(&self) -> PhaseDurations {
        PhaseDurations::new(self.fade_in, self.display, self.fade_out, self.void)
    }
}

/// Manually configured breath pattern and optional tempo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathConfig {
    #[serde(default = "default_inhale")]
    pub inhale: f64,
    #[serde(default = "default_hold_in")]
    pub hold_in: f64,
    #[serde(default = "default_exhale")]
    pub exhale: f64,
    #[serde(default = "default_hold_out")]
    pub hold_out: f64,
    /// Default tempo for musical alignment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            inhale: default_inhale(),
            hold_in: default_hold_in(),
            exhale: default_exhale(),
            hold_out: default_hold_out(),
            bpm: None,
        }
    }
}

impl BreathConfig {
    pub fn pattern(&self) -> BreathPattern {
        BreathPattern::new(self.inhale, self.hold_in, self.exhale, self.hold_out)
    }
}

/// Session-level defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Planned session length in seconds.
    #[serde(default = "default_planned_secs")]
    pub planned_secs: f64,
    /// Interval at which hosts should resample the capacity curve.
    #[serde(default = "default_resample_ms")]
    pub resample_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            planned_secs: default_planned_secs(),
            resample_ms: default_resample_ms(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub phases: PhaseConfig,
    #[serde(default)]
    pub breath: BreathConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Default on-disk location: `<config dir>/stillroom/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("stillroom").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist or cannot be read.
    pub fn load() -> Self {
        Self::default_path()
            .ok()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, toml).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Check values the engine would otherwise only clamp.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields: [(&'static str, f64); 8] = [
            ("phases.fade_in", self.phases.fade_in),
            ("phases.display", self.phases.display),
            ("phases.fade_out", self.phases.fade_out),
            ("phases.void", self.phases.void),
            ("breath.inhale", self.breath.inhale),
            ("breath.hold_in", self.breath.hold_in),
            ("breath.exhale", self.breath.exhale),
            ("breath.hold_out", self.breath.hold_out),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteDuration { field, value });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeDuration { field, value });
            }
        }
        if !(self.session.planned_secs > 0.0) || !self.session.planned_secs.is_finite() {
            return Err(ValidationError::NonPositiveSessionLength {
                value: self.session.planned_secs,
            });
        }
        Ok(())
    }
}
