//! Error types for the fallible edges of the crate.
//!
//! The game itself never fails. Errors only come from loading and
//! validating configuration, and from talking to a session that has shut
//! down.

use std::path::PathBuf;
use thiserror::Error;

use crate::runner::types::Track;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `RunnerConfig`
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field is out of range
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    /// One clock step could carry a box past the other without a sampled overlap
    #[error(
        "{track:?} track moves up to {step:.2} units per {step_ms}ms clock step, \
         which is not less than the smallest box extent {limit:.2}"
    )]
    Tunneling {
        track: Track,
        step: f64,
        limit: f64,
        step_ms: u64,
    },
}

/// Errors returned by a runner session handle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The session task has stopped and no longer accepts input
    #[error("Runner session is closed")]
    Closed,
}
