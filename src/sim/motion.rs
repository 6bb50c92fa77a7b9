//! Shared agent motion model
//!
//! Every agent moves continuously along its heading, but only changes heading
//! at cell centers. Reaching a center snaps the agent onto it exactly so that
//! sub-cell drift never accumulates and agents stay on corridor centerlines.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{cell_center, world_to_cell};

/// Heading of an agent (screen coordinates: +y is down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four movable directions, in valid-direction enumeration order
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Unit vector in world space
    pub fn vector(self) -> Vec2 {
        self.offset().as_vec2()
    }

    /// Neighbor offset in grid space
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None => IVec2::ZERO,
        }
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    /// Whether both directions lie on the same axis (including equality)
    pub fn is_collinear(self, other: Direction) -> bool {
        !self.is_none() && (other == self || other == self.opposite())
    }
}

/// Position and heading of an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub direction: Direction,
}

impl Motion {
    pub fn new(pos: Vec2, direction: Direction) -> Self {
        Self { pos, direction }
    }

    /// Grid cell the agent currently occupies
    #[inline]
    pub fn cell(&self, cell_size: f32) -> IVec2 {
        world_to_cell(self.pos, cell_size)
    }

    /// True when this tick's travel would reach or pass the current cell's center
    pub fn at_intersection(&self, cell_size: f32, speed: f32) -> bool {
        let delta = (self.pos - cell_center(self.cell(cell_size), cell_size)).abs();
        delta.x < speed && delta.y < speed
    }

    /// Snap onto the cell center if at an intersection; returns whether it did
    pub fn try_snap(&mut self, cell_size: f32, speed: f32) -> bool {
        if !self.at_intersection(cell_size, speed) {
            return false;
        }
        self.pos = cell_center(self.cell(cell_size), cell_size);
        true
    }

    /// Move one tick along the current heading
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.pos += self.direction.vector() * speed;
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.opposite();
    }
}
