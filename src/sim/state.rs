//! Session state and core simulation types
//!
//! Plain data records owned by the session: entities live in an id-ordered
//! registry, and everything a renderer needs is exported as a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::filter::CollisionCategory;
use crate::error::SimError;

/// Unique entity id, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Hit counter reached the threshold
    HitLimit,
    /// Survival timer ran out without input
    Timeout,
}

/// Linear trajectory for an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Seconds to travel start -> end (> 0)
    pub duration: f32,
    /// Interpolation parameter, 0 at start, 1 at end
    pub progress: f32,
}

impl MovementPath {
    pub fn new(start: Vec2, end: Vec2, duration: f32) -> Result<Self, SimError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SimError::InvalidPath { duration });
        }
        Ok(Self {
            start,
            end,
            duration,
            progress: 0.0,
        })
    }

    /// Advance by `dt` seconds and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.progress += dt / self.duration;
        self.position()
    }

    /// Position at the current progress (clamped to the end point)
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, self.progress.min(1.0))
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Rectangle of full extent `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A simulated object (player or obstacle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialEntity {
    pub id: EntityId,
    pub category: CollisionCategory,
    /// Center position
    pub pos: Vec2,
    /// Position at the start of the current tick (for swept bounds)
    pub prev_pos: Vec2,
    /// Full bounding extent
    pub size: Vec2,
    /// Inactive entities are skipped by motion and collision
    pub active: bool,
    /// Obstacles only; the player is positioned by input
    pub path: Option<MovementPath>,
}

impl SpatialEntity {
    pub fn player(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category: CollisionCategory::PLAYER,
            pos,
            prev_pos: pos,
            size,
            active: true,
            path: None,
        }
    }

    pub fn obstacle(id: EntityId, path: MovementPath, size: Vec2) -> Self {
        Self {
            id,
            category: CollisionCategory::OBSTACLE,
            pos: path.start,
            prev_pos: path.start,
            size,
            active: true,
            path: Some(path),
        }
    }

    pub fn is_player(&self) -> bool {
        self.category == CollisionCategory::PLAYER
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, self.size)
    }

    /// Region covered while moving from `prev_pos` to `pos` this tick
    pub fn swept_bounds(&self) -> Bounds {
        Bounds::centered(self.prev_pos, self.size).union(&self.bounds())
    }
}

/// Id-ordered entity storage. Stale ids resolve to `NotFound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Sorted by id for deterministic iteration
    entities: Vec<SpatialEntity>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an entity, keeping id order
    pub fn insert(&mut self, entity: SpatialEntity) {
        match self.entities.binary_search_by_key(&entity.id, |e| e.id) {
            Ok(idx) => self.entities[idx] = entity,
            Err(idx) => self.entities.insert(idx, entity),
        }
    }

    pub fn get(&self, id: EntityId) -> Result<&SpatialEntity, SimError> {
        self.index_of(id).map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut SpatialEntity, SimError> {
        let idx = self.index_of(id)?;
        Ok(&mut self.entities[idx])
    }

    pub fn remove(&mut self, id: EntityId) -> Result<SpatialEntity, SimError> {
        let idx = self.index_of(id)?;
        Ok(self.entities.remove(idx))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpatialEntity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SpatialEntity> {
        self.entities.iter_mut()
    }

    /// Active obstacles in id order
    pub fn obstacles(&self) -> impl Iterator<Item = &SpatialEntity> {
        self.entities
            .iter()
            .filter(|e| e.active && e.category == CollisionCategory::OBSTACLE)
    }

    pub fn obstacle_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.category == CollisionCategory::OBSTACLE)
            .count()
    }

    fn index_of(&self, id: EntityId) -> Result<usize, SimError> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .map_err(|_| SimError::NotFound(id))
    }
}

/// Intents emitted during a tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New obstacle entered the registry
    Spawned { id: EntityId, pos: Vec2 },
    /// Obstacle finished its path without a contact
    Retired { id: EntityId },
    /// Player contact; the presentation layer should shake for `shake_duration`
    Collision {
        obstacle_id: EntityId,
        pos: Vec2,
        hits: u32,
        shake_duration: f32,
    },
    /// Session entered its terminal state
    GameOver { reason: GameOverReason },
}

/// Render-facing view of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub category: CollisionCategory,
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&SpatialEntity> for EntitySnapshot {
    fn from(e: &SpatialEntity) -> Self {
        Self {
            id: e.id,
            category: e.category,
            pos: e.pos,
            size: e.size,
        }
    }
}

/// Read-only session view for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub game_over_reason: Option<GameOverReason>,
    pub hit_count: u32,
    pub survival_time_remaining: f32,
    pub score: u64,
    pub elapsed: f32,
    pub time_ticks: u64,
    pub entities: Vec<EntitySnapshot>,
}
