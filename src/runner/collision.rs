//! Axis-aligned bounding box overlap between the player and the obstacle.

use serde::{Deserialize, Serialize};

use super::types::*;

/// Fixed box dimensions and anchors. The only moving parts are the two
/// offsets passed to [`check_collision`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub ground_level: f64,
    pub player_left: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub obstacle_width: f64,
    pub obstacle_height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            ground_level: GROUND_LEVEL,
            player_left: PLAYER_LEFT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
        }
    }
}

/// An axis-aligned rectangle, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Aabb {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            right: left + width,
            bottom,
            top: bottom + height,
        }
    }

    /// Strict overlap on both axes. Boxes sharing an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.top > other.bottom
            && self.bottom < other.top
    }
}

impl Geometry {
    pub fn player_box(&self, player_offset: f64) -> Aabb {
        Aabb::new(
            self.player_left,
            self.ground_level + player_offset,
            self.player_width,
            self.player_height,
        )
    }

    pub fn obstacle_box(&self, obstacle_offset: f64) -> Aabb {
        Aabb::new(
            obstacle_offset,
            self.ground_level,
            self.obstacle_width,
            self.obstacle_height,
        )
    }
}

/// True iff the player box at `player_offset` and the obstacle box at
/// `obstacle_offset` overlap.
pub fn check_collision(geometry: &Geometry, player_offset: f64, obstacle_offset: f64) -> bool {
    geometry
        .player_box(player_offset)
        .overlaps(&geometry.obstacle_box(obstacle_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_at_player_left_collides() {
        let g = Geometry::default();
        assert!(check_collision(&g, 0.0, g.player_left));
    }

    #[test]
    fn test_obstacle_far_right_misses() {
        let g = Geometry::default();
        assert!(!check_collision(&g, 0.0, FIELD_WIDTH));
    }

    #[test]
    fn test_touching_right_edge_is_not_a_hit() {
        let g = Geometry::default();
        // playerRight == obstacleLeft
        let obstacle_left = g.player_left + g.player_width;
        assert!(!check_collision(&g, 0.0, obstacle_left));
        assert!(check_collision(&g, 0.0, obstacle_left - 0.001));
    }

    #[test]
    fn test_touching_left_edge_is_not_a_hit() {
        let g = Geometry::default();
        // obstacleRight == playerLeft
        let obstacle_left = g.player_left - g.obstacle_width;
        assert!(!check_collision(&g, 0.0, obstacle_left));
        assert!(check_collision(&g, 0.0, obstacle_left + 0.001));
    }

    #[test]
    fn test_player_bottom_on_obstacle_top_is_not_a_hit() {
        let g = Geometry::default();
        // playerBottom == obstacleTop
        assert!(!check_collision(&g, g.obstacle_height, g.player_left));
        assert!(check_collision(&g, g.obstacle_height - 0.001, g.player_left));
    }

    #[test]
    fn test_jump_peak_clears_obstacle() {
        let g = Geometry::default();
        assert!(!check_collision(&g, JUMP_PEAK, g.player_left));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }
}
