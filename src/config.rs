//! Runner configuration: geometry, timing, and the clock step.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "traversal_ms": 2500, "traversal_easing": "ease_in_out" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::runner::collision::Geometry;
use crate::runner::easing::Easing;
use crate::runner::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub ground_level: f64,

    pub player_left: f64,
    pub player_width: f64,
    pub player_height: f64,

    pub obstacle_width: f64,
    pub obstacle_height: f64,
    /// Obstacle x at the start of each pass (off-screen right).
    pub obstacle_start: f64,
    /// Obstacle x at the end of each pass (off-screen left).
    pub obstacle_end: f64,

    pub traversal_ms: u64,
    pub traversal_easing: Easing,

    pub jump_peak: f64,
    pub jump_phase_ms: u64,

    pub clock_step_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_level: GROUND_LEVEL,
            player_left: PLAYER_LEFT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_start: FIELD_WIDTH,
            obstacle_end: -OBSTACLE_WIDTH,
            traversal_ms: TRAVERSAL_MS,
            traversal_easing: Easing::Linear,
            jump_peak: JUMP_PEAK,
            jump_phase_ms: JUMP_PHASE_MS,
            clock_step_ms: CLOCK_STEP_MS,
        }
    }
}

impl RunnerConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded runner config");
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            ground_level: self.ground_level,
            player_left: self.player_left,
            player_width: self.player_width,
            player_height: self.player_height,
            obstacle_width: self.obstacle_width,
            obstacle_height: self.obstacle_height,
        }
    }

    /// Largest distance the obstacle can move in one clock step.
    pub fn max_obstacle_step(&self) -> f64 {
        let speed = (self.obstacle_start - self.obstacle_end).abs() / self.traversal_ms as f64;
        speed * self.traversal_easing.max_slope() * self.clock_step_ms as f64
    }

    /// Largest distance the player can move in one clock step. Both jump
    /// phases use quadratic curves.
    pub fn max_player_step(&self) -> f64 {
        let speed = self.jump_peak.abs() / self.jump_phase_ms as f64;
        speed * Easing::EaseOut.max_slope() * self.clock_step_ms as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("jump_peak", self.jump_peak),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }

        for (field, value) in [
            ("ground_level", self.ground_level),
            ("player_left", self.player_left),
            ("obstacle_start", self.obstacle_start),
            ("obstacle_end", self.obstacle_end),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite, got {}", value),
                });
            }
        }

        for (field, value) in [
            ("traversal_ms", self.traversal_ms),
            ("jump_phase_ms", self.jump_phase_ms),
            ("clock_step_ms", self.clock_step_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1ms".to_string(),
                });
            }
        }

        if self.obstacle_start <= self.obstacle_end {
            return Err(ConfigError::Invalid {
                field: "obstacle_start",
                reason: format!(
                    "must be right of obstacle_end ({} <= {})",
                    self.obstacle_start, self.obstacle_end
                ),
            });
        }

        let horizontal_limit = self.player_width.min(self.obstacle_width);
        let step = self.max_obstacle_step();
        if step >= horizontal_limit {
            return Err(ConfigError::Tunneling {
                track: Track::Obstacle,
                step,
                limit: horizontal_limit,
                step_ms: self.clock_step_ms,
            });
        }

        let vertical_limit = self.player_height.min(self.obstacle_height);
        let step = self.max_player_step();
        if step >= vertical_limit {
            return Err(ConfigError::Tunneling {
                track: Track::Player,
                step,
                limit: vertical_limit,
                step_ms: self.clock_step_ms,
            });
        }

        Ok(())
    }
}
