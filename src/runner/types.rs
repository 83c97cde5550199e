//! Runner data structures.
//!
//! A jump-over-the-obstacle minigame: the player box stays at a fixed column
//! and hops while a single obstacle slides across the field from right to
//! left. Coordinates are field units with y growing upward from the ground.

use serde::{Deserialize, Serialize};

/// Field width. The obstacle starts each pass at this x.
pub const FIELD_WIDTH: f64 = 400.0;
/// Field height, used only for scaling when rendering.
pub const FIELD_HEIGHT: f64 = 300.0;

/// Ground line. Both boxes rest on it.
pub const GROUND_LEVEL: f64 = 50.0;

/// Player box: fixed left edge, square.
pub const PLAYER_LEFT: f64 = 50.0;
pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 50.0;

/// Obstacle box.
pub const OBSTACLE_WIDTH: f64 = 30.0;
pub const OBSTACLE_HEIGHT: f64 = 60.0;

/// Peak offset of a jump above the resting position.
pub const JUMP_PEAK: f64 = 180.0;
/// Duration of each jump phase (ascend, descend) in milliseconds.
pub const JUMP_PHASE_MS: u64 = 500;

/// Duration of one full obstacle pass in milliseconds.
pub const TRAVERSAL_MS: u64 = 3000;

/// Clock step in milliseconds (~60 FPS).
pub const CLOCK_STEP_MS: u64 = 16;

/// Resting player offset (standing on the ground).
pub const PLAYER_REST: f64 = 0.0;

/// Game mode. Only `Ready -> Running -> Over -> Ready` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Ready,
    Running,
    Over,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Over => "Over",
        }
    }
}

/// One independently animated scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Vertical offset of the player above its resting position.
    Player,
    /// Horizontal position of the obstacle's left edge.
    Obstacle,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Player, Track::Obstacle];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Player => 0,
            Self::Obstacle => 1,
        }
    }
}

/// Read-only view of a game for rendering and host collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunnerSnapshot {
    pub mode: GameMode,
    pub score: u32,
    pub high_score: u32,
    pub player_offset: f64,
    pub obstacle_offset: f64,
    /// True while a jump animation is in flight.
    pub jumping: bool,
}
