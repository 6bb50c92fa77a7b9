//! Adversary controller
//!
//! Adversaries pick a new heading only at cell centers. Reversing is never
//! chosen unless it is the only way out; the one exception is the forced
//! reversal when an adversary becomes frightened.
//!
//! Each [`Personality`] reduces to "pick the valid direction whose next cell
//! is closest to some target", except `Random`, which picks uniformly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::grid::GridMap;
use super::motion::{Direction, Motion};
use crate::settings::Settings;

/// Fixed behavior policy of an adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    /// Heads straight for the player
    Chase,
    /// Heads for a point ahead of the player
    Ambush,
    /// Wanders uniformly at random
    Random,
    /// Circles the maze corners, chasing when none is far enough away
    Patrol,
}

impl Personality {
    /// Standard lineup, in spawn order
    pub const ROSTER: [Personality; 4] = [
        Personality::Chase,
        Personality::Ambush,
        Personality::Random,
        Personality::Patrol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Chase => "chase",
            Personality::Ambush => "ambush",
            Personality::Random => "random",
            Personality::Patrol => "patrol",
        }
    }

    /// Point this personality steers toward, `None` for `Random`
    pub fn target(
        self,
        from: Vec2,
        player: PlayerView,
        grid: &GridMap,
        settings: &Settings,
    ) -> Option<Vec2> {
        let cell = grid.cell_size();
        match self {
            Personality::Chase => Some(player.pos),
            Personality::Ambush => {
                Some(player.pos + player.direction.vector() * settings.ambush_lead_cells * cell)
            }
            Personality::Random => None,
            Personality::Patrol => Some(
                patrol_corner(from, grid, settings).unwrap_or(player.pos),
            ),
        }
    }

    /// Pick a heading among `options` (already filtered for reversal)
    pub fn choose(
        self,
        from: Vec2,
        options: &[Direction],
        player: PlayerView,
        grid: &GridMap,
        settings: &Settings,
        rng: &mut Pcg32,
    ) -> Option<Direction> {
        match self.target(from, player, grid, settings) {
            Some(target) => toward_target(from, target, options, grid.cell_size()),
            None => random_choice(options, rng),
        }
    }
}

/// What an adversary may know about the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub direction: Direction,
}

/// Option whose one-cell step lands closest to `target`
///
/// Ties keep the earliest option, so the result is fully determined by the
/// inputs.
pub fn toward_target(
    from: Vec2,
    target: Vec2,
    options: &[Direction],
    cell_size: f32,
) -> Option<Direction> {
    let mut best = None;
    let mut best_distance = f32::INFINITY;
    for &dir in options {
        let distance = (from + dir.vector() * cell_size).distance(target);
        if distance < best_distance {
            best_distance = distance;
            best = Some(dir);
        }
    }
    best
}

pub fn random_choice(options: &[Direction], rng: &mut Pcg32) -> Option<Direction> {
    if options.is_empty() {
        return None;
    }
    Some(options[rng.random_range(0..options.len())])
}

/// Nearest inset corner that is more than the minimum distance away
fn patrol_corner(from: Vec2, grid: &GridMap, settings: &Settings) -> Option<Vec2> {
    let cell = grid.cell_size();
    let inset = settings.patrol_corner_inset;
    let (w, h) = (grid.width() as f32, grid.height() as f32);
    let corners = [
        Vec2::new(inset, inset),
        Vec2::new(w - inset, inset),
        Vec2::new(inset, h - inset),
        Vec2::new(w - inset, h - inset),
    ]
    .map(|c| c * cell);
    let min_distance = settings.patrol_min_distance * cell;

    let mut best = None;
    let mut best_distance = f32::INFINITY;
    for corner in corners {
        let distance = from.distance(corner);
        if distance > min_distance && distance < best_distance {
            best_distance = distance;
            best = Some(corner);
        }
    }
    best
}

/// Uniformly random cardinal heading
pub fn random_direction(rng: &mut Pcg32) -> Direction {
    Direction::CARDINALS[rng.random_range(0..Direction::CARDINALS.len())]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    personality: Personality,
    pub motion: Motion,
    pub frightened: bool,
    /// Collision half-extent
    pub radius: f32,
}

impl Adversary {
    pub fn new(personality: Personality, spawn: Vec2, radius: f32, rng: &mut Pcg32) -> Self {
        Self {
            personality,
            motion: Motion::new(spawn, random_direction(rng)),
            frightened: false,
            radius,
        }
    }

    #[inline]
    pub fn personality(&self) -> Personality {
        self.personality
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

    /// Travel per tick in the current mode
    pub fn speed(&self, settings: &Settings) -> f32 {
        if self.frightened {
            settings.frightened_speed()
        } else {
            settings.adversary_speed
        }
    }

    /// Enter frightened mode and turn around, even if already frightened
    pub fn frighten(&mut self) {
        self.frightened = true;
        self.motion.reverse();
    }

    /// Back to spawn, calm, with a fresh random heading
    pub fn reset(&mut self, spawn: Vec2, rng: &mut Pcg32) {
        self.motion = Motion::new(spawn, random_direction(rng));
        self.frightened = false;
    }

    /// Valid directions from the current cell, minus reversal unless it's the only one
    pub fn options(&self, grid: &GridMap) -> Vec<Direction> {
        let mut options = grid.valid_directions(self.motion.pos);
        if options.len() > 1 {
            let back = self.motion.direction.opposite();
            options.retain(|&d| d != back);
        }
        options
    }

    /// Advance one tick
    ///
    /// `power_mode` rising while calm frightens this adversary (with the
    /// forced reversal); power mode being off always calms it.
    pub fn update(
        &mut self,
        grid: &GridMap,
        player: PlayerView,
        power_mode: bool,
        settings: &Settings,
        rng: &mut Pcg32,
    ) {
        if power_mode && !self.frightened {
            self.frighten();
        } else if !power_mode {
            self.frightened = false;
        }

        let speed = self.speed(settings);
        if self.motion.try_snap(grid.cell_size(), speed) {
            let options = self.options(grid);
            let choice = if self.frightened {
                random_choice(&options, rng)
            } else {
                self.personality
                    .choose(self.motion.pos, &options, player, grid, settings, rng)
            };
            // No way out keeps the old heading; only a malformed maze gets here
            if let Some(direction) = choice {
                self.motion.direction = direction;
            }
        }

        self.motion.advance(speed);
    }
}
