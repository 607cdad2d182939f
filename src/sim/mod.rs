//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies
//! - Single-threaded: one `tick` advances everything, input is applied
//!   between ticks

pub mod collision;
pub mod filter;
pub mod motion;
pub mod session;
pub mod spawn;
pub mod state;

pub use collision::{CollisionEvent, CollisionResolver};
pub use filter::{CollisionCategory, CollisionFilter};
pub use motion::MotionSystem;
pub use session::{GameSession, NoHooks, SessionHooks};
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use state::{
    Bounds, EntityId, EntityRegistry, EntitySnapshot, GameEvent, GameOverReason, GameSnapshot,
    MovementPath, SessionState, SpatialEntity,
};
