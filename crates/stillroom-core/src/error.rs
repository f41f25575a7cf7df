//! Core error types for stillroom-core.
//!
//! The timing engine itself never errors on degenerate numeric input --
//! zero, negative, or non-finite durations are resolved locally by clamping
//! or no-op (see the individual modules). Errors exist for the surrounding
//! configuration layer and for validating caller-supplied data at the API
//! boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stillroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No platform config directory available
    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A duration field holds NaN or infinity
    #[error("Duration '{field}' is not a finite number: {value}")]
    NonFiniteDuration { field: &'static str, value: f64 },

    /// A duration field is negative
    #[error("Duration '{field}' must not be negative: {value}")]
    NegativeDuration { field: &'static str, value: f64 },

    /// Planned session length must be strictly positive
    #[error("Planned session length must be positive: {value}")]
    NonPositiveSessionLength { value: f64 },
}
