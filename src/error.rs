//! Error types
//!
//! Only session construction and configuration loading can fail. Everything
//! on the per-tick path is total.

use thiserror::Error;

/// A maze layout that cannot host a valid session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Layout has no rows")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Unknown cell code {code} at ({x}, {y})")]
    UnknownCell { code: u8, x: usize, y: usize },

    #[error("Layout has no player spawn")]
    MissingPlayerSpawn,

    #[error("Layout has {count} player spawns, expected exactly one")]
    DuplicatePlayerSpawn { count: usize },

    #[error("Layout has no adversary spawn")]
    MissingAdversarySpawn,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Session construction failure
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Whether fixing the settings file alone could resolve this
    pub fn is_config(&self) -> bool {
        matches!(self, SessionError::Config(_))
    }
}
