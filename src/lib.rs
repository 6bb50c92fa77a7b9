//! Maze Chase - a grid-based arcade chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, agents, session state, tick)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Construction and configuration errors
//!
//! Rendering, audio, and input polling live outside this crate. They read
//! [`sim::Snapshot`] / [`sim::GameEvent`] and feed [`sim::TickInput`] back in.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, MapError, SessionError};
pub use settings::Settings;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const SIM_HZ: u32 = 60;

    /// Edge length of one grid cell in world units
    pub const CELL_SIZE: f32 = 30.0;

    /// Reference maze dimensions in cells
    pub const GRID_WIDTH: usize = 20;
    pub const GRID_HEIGHT: usize = 15;

    /// Player travel per tick
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Adversary travel per tick
    pub const ADVERSARY_SPEED: f32 = 1.5;
    /// Frightened adversaries move at this fraction of their speed
    pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.5;

    /// Collision half-extent as a fraction of the cell size (floored)
    pub const COLLISION_RADIUS_FACTOR: f32 = 0.4;

    /// Power mode duration
    pub const POWER_MODE_SECONDS: f32 = 10.0;

    pub const STARTING_LIVES: u8 = 3;
    pub const STARTING_LEVEL: u32 = 1;

    /// Score values
    pub const PELLET_SCORE: u64 = 10;
    pub const POWER_PELLET_SCORE: u64 = 50;
    pub const ADVERSARY_SCORE: u64 = 200;

    /// Ambush targets this many cells ahead of the player
    pub const AMBUSH_LEAD_CELLS: f32 = 4.0;
    /// Patrol corners sit this many cells in from each edge
    pub const PATROL_CORNER_INSET: f32 = 1.5;
    /// Patrol ignores corners closer than this many cells
    pub const PATROL_MIN_DISTANCE: f32 = 3.0;

    /// Seed used when none is configured
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;
}

/// Grid cell containing a world position (floor division, may be off-grid)
#[inline]
pub fn world_to_cell(pos: Vec2, cell_size: f32) -> IVec2 {
    (pos / cell_size).floor().as_ivec2()
}

/// World coordinate of a cell's center
#[inline]
pub fn cell_center(cell: IVec2, cell_size: f32) -> Vec2 {
    (cell.as_vec2() + Vec2::splat(0.5)) * cell_size
}
