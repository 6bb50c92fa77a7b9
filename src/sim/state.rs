//! Session state and core simulation types
//!
//! One [`GameState`] owns the maze, every agent, the RNG, and all scoring
//! state. Only the tick driver and the explicit phase requests mutate it.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::{Adversary, Personality, PlayerView};
use super::collision::Bounds;
use super::grid::{CellKind, GridMap};
use super::motion::Direction;
use super::player::Player;
use crate::consts::STARTING_LEVEL;
use crate::error::SessionError;
use crate::settings::Settings;

/// Overall session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen, resumable
    Paused,
    /// Out of lives
    GameOver,
    /// Every collectible eaten
    Win,
}

/// Something the presentation layer may want to react to (sound, effects)
///
/// Emitted once on the tick it happens and never replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    PowerModeEnded,
    /// Adversary at this index was eaten and sent home
    AdversaryEaten { index: usize },
    LifeLost { lives_remaining: u8 },
    GameOver,
    Win,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) settings: Settings,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    /// Global power mode flag
    pub power_mode: bool,
    /// Power mode ticks remaining
    pub power_ticks: u32,
    /// Collectibles eaten this session
    pub collected: usize,
    pub grid: GridMap,
    pub player: Player,
    /// Fixed order: also the collision resolution order
    pub adversaries: Vec<Adversary>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Build a session on the reference maze
    pub fn new(settings: Settings) -> Result<Self, SessionError> {
        settings.validate()?;
        let grid = GridMap::reference(settings.cell_size)?;
        Ok(Self::with_grid(settings, grid))
    }

    /// Build a session on a custom layout (see [`GridMap::from_rows`])
    pub fn with_layout<R: AsRef<[u8]>>(
        settings: Settings,
        rows: &[R],
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        let grid = GridMap::from_rows(rows, settings.cell_size)?;
        Ok(Self::with_grid(settings, grid))
    }

    fn with_grid(settings: Settings, grid: GridMap) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let radius = settings.collision_radius();
        let player = Player::new(grid.player_spawn(), settings.player_speed, radius);
        let adversaries = Personality::ROSTER
            .iter()
            .enumerate()
            .map(|(i, &personality)| {
                Adversary::new(personality, grid.adversary_spawn(i), radius, &mut rng)
            })
            .collect();

        log::info!(
            "Session created: seed {}, {} collectibles, {} adversaries",
            settings.seed,
            grid.total_collectible_count(),
            Personality::ROSTER.len()
        );

        Self {
            phase: GamePhase::Menu,
            score: 0,
            lives: settings.starting_lives,
            level: STARTING_LEVEL,
            time_ticks: 0,
            power_mode: false,
            power_ticks: 0,
            collected: 0,
            grid,
            player,
            adversaries,
            rng,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Collectibles on the map at session start
    pub fn total_collectibles(&self) -> usize {
        self.grid.total_collectible_count()
    }

    /// Menu -> Playing
    pub fn start_from_menu(&mut self) -> bool {
        self.transition(GamePhase::Menu, GamePhase::Playing)
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::Playing, GamePhase::Paused)
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::Playing)
    }

    /// GameOver | Win -> fresh Playing session
    pub fn restart_after_end(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Win) {
            log::debug!("Ignoring restart request in {:?}", self.phase);
            return false;
        }
        self.reinitialize();
        self.phase = GamePhase::Playing;
        log::info!("Session restarted");
        true
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if self.phase != from {
            log::debug!("Ignoring {:?} -> {:?} request in {:?}", from, to, self.phase);
            return false;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        true
    }

    /// Reset score, lives, level, collectibles, and every agent
    ///
    /// The RNG keeps its stream, so a restarted session doesn't replay the
    /// previous one.
    fn reinitialize(&mut self) {
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.level = STARTING_LEVEL;
        self.time_ticks = 0;
        self.power_mode = false;
        self.power_ticks = 0;
        self.collected = 0;
        self.grid.restore();
        self.reset_positions();
    }

    /// Player input; only honored while playing
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.phase == GamePhase::Playing {
            self.player.queue_direction(direction);
        }
    }

    /// Start (or restart) power mode at full duration and frighten everyone
    ///
    /// Every adversary reverses, including ones already frightened.
    pub fn activate_power_mode(&mut self) {
        self.power_mode = true;
        self.power_ticks = self.settings.power_mode_ticks();
        for adversary in &mut self.adversaries {
            adversary.frighten();
        }
        log::debug!("Power mode on for {} ticks", self.power_ticks);
    }

    /// Count power mode down one tick; returns true when it just ended
    pub fn tick_power_mode(&mut self) -> bool {
        if !self.power_mode {
            return false;
        }
        self.power_ticks = self.power_ticks.saturating_sub(1);
        if self.power_ticks > 0 {
            return false;
        }
        self.power_mode = false;
        for adversary in &mut self.adversaries {
            adversary.frightened = false;
        }
        log::debug!("Power mode off");
        true
    }

    /// Everyone back to their spawn
    pub fn reset_positions(&mut self) {
        self.player.reset(self.grid.player_spawn());
        for (i, adversary) in self.adversaries.iter_mut().enumerate() {
            adversary.reset(self.grid.adversary_spawn(i), &mut self.rng);
        }
    }

    /// Read-only copy of the player for adversary targeting
    pub fn player_view(&self) -> PlayerView {
        PlayerView {
            pos: self.player.pos(),
            direction: self.player.direction(),
        }
    }

    /// Everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level: self.level,
            collected: self.collected,
            total_collectibles: self.total_collectibles(),
            power_mode: self.power_mode,
            power_ticks: self.power_ticks,
            player: AgentView {
                pos: self.player.pos(),
                direction: self.player.direction(),
                bounds: self.player.bounds(),
            },
            adversaries: self
                .adversaries
                .iter()
                .map(|a| AdversaryView {
                    agent: AgentView {
                        pos: a.pos(),
                        direction: a.direction(),
                        bounds: a.bounds(),
                    },
                    personality: a.personality(),
                    frightened: a.frightened,
                })
                .collect(),
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            cell_size: self.grid.cell_size(),
            cells: self.grid.cells().to_vec(),
            pellets: self.grid.pellets().to_vec(),
            power_pellets: self.grid.power_pellets().to_vec(),
        }
    }
}

/// Position, heading, and bounds of one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub pos: Vec2,
    pub direction: Direction,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdversaryView {
    #[serde(flatten)]
    pub agent: AgentView,
    pub personality: Personality,
    pub frightened: bool,
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub collected: usize,
    pub total_collectibles: usize,
    pub power_mode: bool,
    pub power_ticks: u32,
    pub player: AgentView,
    pub adversaries: Vec<AdversaryView>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f32,
    /// Row-major layout
    pub cells: Vec<CellKind>,
    pub pellets: Vec<IVec2>,
    pub power_pellets: Vec<IVec2>,
}
