//! Sleep Runner - reward minigame for a sleep-logging app.
//!
//! The player hops over an obstacle that keeps sliding across the field.
//! This library holds the simulation (state machine, collision detection,
//! animation clock, async session driver) and the terminal rendering used
//! by the `sleep-runner` binary.

pub mod config;
pub mod error;
pub mod runner;
pub mod ui;

pub use config::RunnerConfig;
pub use error::{ConfigError, SessionError};
pub use runner::{GameMode, RunnerGame, RunnerInput, RunnerSession, RunnerSnapshot, Track};
