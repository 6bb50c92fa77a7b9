//! Game settings and tuning
//!
//! Loaded from an optional JSON file; missing fields take the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for adversary choices
    pub seed: u64,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Edge length of one grid cell in world units
    pub cell_size: f32,

    // === Movement ===
    /// Player travel per tick
    pub player_speed: f32,
    /// Adversary travel per tick
    pub adversary_speed: f32,
    /// Speed multiplier while frightened (0, 1]
    pub frightened_speed_factor: f32,

    // === Rules ===
    /// Power mode duration in seconds
    pub power_mode_seconds: f32,
    /// Lives at session start
    pub starting_lives: u8,

    // === Adversary targeting (in cells) ===
    pub ambush_lead_cells: f32,
    pub patrol_corner_inset: f32,
    pub patrol_min_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_rate: SIM_HZ,
            cell_size: CELL_SIZE,

            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            frightened_speed_factor: FRIGHTENED_SPEED_FACTOR,

            power_mode_seconds: POWER_MODE_SECONDS,
            starting_lives: STARTING_LIVES,

            ambush_lead_cells: AMBUSH_LEAD_CELLS,
            patrol_corner_inset: PATROL_CORNER_INSET,
            patrol_min_distance: PATROL_MIN_DISTANCE,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, using defaults if the file doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Settings file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reject values the motion model can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be positive"));
        }
        if !(self.cell_size > 0.0) {
            return Err(invalid("cell_size", "must be positive"));
        }
        // Beyond half a cell every position reads as a center and agents jump cells
        let max_speed = self.cell_size / 2.0;
        for (field, speed) in [
            ("player_speed", self.player_speed),
            ("adversary_speed", self.adversary_speed),
        ] {
            if !(speed > 0.0 && speed <= max_speed) {
                return Err(invalid(
                    field,
                    format!("must be in (0, {}], got {}", max_speed, speed),
                ));
            }
        }
        if !(self.frightened_speed_factor > 0.0 && self.frightened_speed_factor <= 1.0) {
            return Err(invalid("frightened_speed_factor", "must be in (0, 1]"));
        }
        if !(self.power_mode_seconds > 0.0) {
            return Err(invalid("power_mode_seconds", "must be positive"));
        }
        for (field, value) in [
            ("ambush_lead_cells", self.ambush_lead_cells),
            ("patrol_corner_inset", self.patrol_corner_inset),
            ("patrol_min_distance", self.patrol_min_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(
                    field,
                    format!("must be finite and non-negative, got {}", value),
                ));
            }
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        Ok(())
    }

    /// Power mode countdown length in ticks
    pub fn power_mode_ticks(&self) -> u32 {
        ((self.power_mode_seconds * self.tick_rate as f32).round() as u32).max(1)
    }

    /// Half-extent of every agent's collision square
    pub fn collision_radius(&self) -> f32 {
        (self.cell_size * COLLISION_RADIUS_FACTOR).floor()
    }

    /// Adversary travel per tick while frightened
    pub fn frightened_speed(&self) -> f32 {
        self.adversary_speed * self.frightened_speed_factor
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
