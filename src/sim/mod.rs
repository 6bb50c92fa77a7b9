//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (adversaries in roster order)
//! - No rendering or platform dependencies

pub mod adversary;
pub mod collision;
pub mod grid;
pub mod motion;
pub mod player;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, Personality, PlayerView};
pub use collision::Bounds;
pub use grid::{CellKind, Collectible, GridMap, REFERENCE_LAYOUT};
pub use motion::{Direction, Motion};
pub use player::Player;
pub use state::{AdversaryView, AgentView, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
