//! Asteroid Dodge - deterministic core of a 2D arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, motion, collisions, session)
//! - `config`: Host-overridable game tuning
//! - `error`: Error type shared by all fallible operations
//!
//! Rendering, audio and input devices are not part of this crate. The host
//! drives [`sim::GameSession::tick`], feeds pointer positions through
//! [`sim::GameSession::set_player_target`] and draws [`sim::GameSnapshot`]s.

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::SimError;

use glam::Vec2;

/// Default game tuning constants
pub mod consts {
    /// Tolerance applied to spawn slot comparisons so that summed frame
    /// deltas (e.g. 60 x 1/60) still reach a slot boundary.
    pub const TIME_EPSILON: f32 = 1e-4;

    /// Shortest allowed gap between spawns
    pub const MIN_SPAWN_SLOT: f32 = 1e-3;
    /// Spawn requests a single tick may emit; larger backlogs are dropped
    pub const MAX_SPAWNS_PER_TICK: usize = 256;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Seconds per spawn batch
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Obstacles per batch, spread evenly across the interval (~0.33s per slot)
    pub const SPAWN_BATCH_SIZE: u32 = 3;

    /// Traversal duration range for obstacles (seconds, right edge to left edge)
    pub const MIN_TRAVERSAL_DURATION: f32 = 2.0;
    pub const MAX_TRAVERSAL_DURATION: f32 = 4.0;

    /// Collisions that end the run
    pub const HIT_THRESHOLD: u32 = 2;
    /// Seconds the player may idle before the run ends
    pub const SURVIVAL_WINDOW: f32 = 5.0;

    /// Bounding sizes (full width, full height)
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    pub const OBSTACLE_WIDTH: f32 = 32.0;
    pub const OBSTACLE_HEIGHT: f32 = 32.0;

    /// Player start position as a fraction of the field
    pub const PLAYER_START_X: f32 = 0.1;
    pub const PLAYER_START_Y: f32 = 0.5;

    /// Camera shake requested from the presentation layer per collision
    pub const COLLISION_SHAKE_DURATION: f32 = 2.5;

    /// Score awarded per spawned obstacle
    pub const SCORE_PER_OBSTACLE: u64 = 100;
}

/// Returns true if both components are finite
#[inline]
pub fn is_finite_point(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
