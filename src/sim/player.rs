//! Player controller
//!
//! Input is buffered in a single pending slot (last write wins) and retried
//! every tick until the maze allows it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::grid::GridMap;
use super::motion::{Direction, Motion};

/// Heading the player starts each life with
pub const PLAYER_START_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub motion: Motion,
    /// Requested heading not yet adopted
    pub pending: Option<Direction>,
    /// Travel per tick
    pub speed: f32,
    /// Collision half-extent
    pub radius: f32,
}

impl Player {
    pub fn new(spawn: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            motion: Motion::new(spawn, PLAYER_START_DIRECTION),
            pending: None,
            speed,
            radius,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.motion.direction
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.motion.pos, self.radius)
    }

    /// Record a requested heading, replacing any earlier request
    pub fn queue_direction(&mut self, direction: Direction) {
        if direction.is_none() {
            return;
        }
        self.pending = Some(direction);
    }

    /// Whether moving one tick in `direction` keeps the player out of walls
    ///
    /// At a cell center the neighbor cell decides. Between centers only the
    /// current axis is open: turning there would cut the corner.
    pub fn can_move(&self, direction: Direction, grid: &GridMap) -> bool {
        if direction.is_none() {
            return false;
        }
        let cell_size = grid.cell_size();
        if self.motion.at_intersection(cell_size, self.speed) {
            let cell = self.motion.cell(cell_size);
            return !grid.cell_is_wall(cell + direction.offset());
        }
        self.motion.direction.is_collinear(direction)
            && !grid.is_wall(self.motion.pos + direction.vector() * self.speed)
    }

    /// Advance one tick
    ///
    /// Returns whether the player actually moved.
    pub fn update(&mut self, grid: &GridMap) -> bool {
        self.motion.try_snap(grid.cell_size(), self.speed);

        if let Some(next) = self.pending {
            if self.can_move(next, grid) {
                self.motion.direction = next;
                self.pending = None;
            }
        }

        // Blocked: hold position this tick, try again next tick
        if !self.can_move(self.motion.direction, grid) {
            return false;
        }
        self.motion.advance(self.speed);
        true
    }

    /// Back to spawn with the starting heading and no pending input
    pub fn reset(&mut self, spawn: Vec2) {
        self.motion = Motion::new(spawn, PLAYER_START_DIRECTION);
        self.pending = None;
    }
}
