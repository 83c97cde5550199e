//! Timing curves for animated tracks.

use serde::{Deserialize, Serialize};

/// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow, accelerates (quadratic).
    EaseIn,
    /// Starts fast, decelerates (quadratic).
    EaseOut,
    /// Slow at both ends (quadratic).
    EaseInOut,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }

    /// Steepest slope of the curve, i.e. peak speed relative to the
    /// average speed of a linear move over the same span.
    pub fn max_slope(&self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::EaseIn | Self::EaseOut | Self::EaseInOut => 2.0,
        }
    }
}
