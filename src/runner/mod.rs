//! Obstacle-runner simulation.

pub mod animator;
pub mod collision;
pub mod easing;
pub mod logic;
pub mod session;
pub mod tracker;
pub mod types;

pub use animator::{AnimationHandle, Animator, AnimatorEvent, Segment, Timeline};
pub use collision::{check_collision, Aabb, Geometry};
pub use easing::Easing;
pub use logic::{tick_runner, RunnerGame, RunnerInput};
pub use session::RunnerSession;
pub use tracker::PositionTracker;
pub use types::{GameMode, RunnerSnapshot, Track};
