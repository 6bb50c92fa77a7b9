//! Collision bounds for agents
//!
//! Agents collide as axis-aligned squares centered on their position, not by
//! point distance. Touching edges do not count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned square collision bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Center of the square
    pub center: Vec2,
    /// Half the side length (the agent's collision radius)
    pub radius: f32,
}

impl Bounds {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.radius)
    }

    /// Strict overlap test on both axes
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}
