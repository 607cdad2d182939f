//! Simulation errors
//!
//! The core performs no I/O, so every variant is either a caller contract
//! violation (bad `dt`, bad coordinates, stale id) or a configuration problem.

use crate::sim::EntityId;

//=== SimError ============================================================

/// Errors returned by the simulation and its configuration layer.
#[derive(Debug)]
pub enum SimError {
    /// `tick` was called with a negative or non-finite delta.
    InvalidDeltaTime(f32),

    /// `set_player_target` was called with non-finite coordinates.
    InvalidPosition { x: f32, y: f32 },

    /// The id refers to an entity that was retired, removed, or never existed.
    NotFound(EntityId),

    /// A movement path was built with a non-positive or non-finite duration.
    InvalidPath { duration: f32 },

    /// An operation that changes the world was attempted after game over.
    SessionOver,

    /// A configuration value is out of range.
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    ConfigParse(serde_json::Error),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeltaTime(dt) => write!(f, "Invalid tick delta: {}", dt),
            Self::InvalidPosition { x, y } => {
                write!(f, "Invalid player target: ({}, {})", x, y)
            }
            Self::NotFound(id) => write!(f, "Entity {} not found", id),
            Self::InvalidPath { duration } => {
                write!(f, "Invalid movement path duration: {}", duration)
            }
            Self::SessionOver => write!(f, "Session is over"),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::ConfigParse(e) => write!(f, "Configuration parse error: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigParse(e)
    }
}
