//! Terminal rendering for the runner.

pub mod palette;
pub mod runner_scene;

pub use palette::{Palette, Theme};
pub use runner_scene::render_runner_scene;
