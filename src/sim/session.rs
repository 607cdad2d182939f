//! Session controller and per-frame tick
//!
//! Owns the entity registry, counters and timers, and runs the systems in a
//! fixed order each frame: survival timer, motion, collisions, retirement,
//! spawning.

use glam::Vec2;

use super::collision::CollisionResolver;
use super::filter::CollisionFilter;
use super::motion::MotionSystem;
use super::spawn::{SpawnRequest, SpawnScheduler};
use super::state::{
    EntityId, EntityRegistry, EntitySnapshot, GameEvent, GameOverReason, GameSnapshot,
    MovementPath, SessionState, SpatialEntity,
};
use crate::config::GameConfig;
use crate::error::SimError;

/// Presentation-layer callbacks, fired synchronously during `tick`
pub trait SessionHooks {
    fn on_spawn(&mut self, _id: EntityId) {}
    /// Fired exactly once per resolved contact (shake, haptics, sound)
    fn on_collision(&mut self, _obstacle_id: EntityId) {}
    fn on_game_over(&mut self, _reason: GameOverReason) {}
}

/// Hooks that ignore everything
#[derive(Debug, Default)]
pub struct NoHooks;

impl SessionHooks for NoHooks {}

/// One run of the game, from first frame to game over
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    state: SessionState,
    game_over_reason: Option<GameOverReason>,
    entities: EntityRegistry,
    player_id: EntityId,
    hits: u32,
    /// Seconds since the last input, summed in f64 so that frame deltas
    /// totalling the survival window compare exactly
    idle_time: f64,
    obstacles_spawned: u64,
    elapsed: f32,
    time_ticks: u64,
    filter: CollisionFilter,
    spawner: SpawnScheduler,
    motion: MotionSystem,
    resolver: CollisionResolver,
    hooks: Box<dyn SessionHooks>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("hits", &self.hits)
            .field("idle_time", &self.idle_time)
            .field("entities", &self.entities.len())
            .finish()
    }
}

impl GameSession {
    /// Start a session with the given config and RNG seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let mut entities = EntityRegistry::new();
        let player_id = entities.next_entity_id();
        entities.insert(SpatialEntity::player(
            player_id,
            config.player_start_position(),
            config.player_size,
        ));

        log::info!("Session started with seed: {}", seed);

        Ok(Self {
            spawner: SpawnScheduler::new(&config, seed),
            idle_time: 0.0,
            config,
            seed,
            state: SessionState::Playing,
            game_over_reason: None,
            entities,
            player_id,
            hits: 0,
            obstacles_spawned: 0,
            elapsed: 0.0,
            time_ticks: 0,
            filter: CollisionFilter::default(),
            motion: MotionSystem,
            resolver: CollisionResolver,
            hooks: Box::new(NoHooks),
        })
    }

    /// Install presentation callbacks
    pub fn set_hooks(&mut self, hooks: Box<dyn SessionHooks>) {
        self.hooks = hooks;
    }

    /// Replace the collision rule table
    pub fn set_filter(&mut self, filter: CollisionFilter) {
        self.filter = filter;
    }

    /// Restart with the same config and seed. Hooks and filter are kept.
    pub fn reset(&mut self) {
        let mut entities = EntityRegistry::new();
        let player_id = entities.next_entity_id();
        entities.insert(SpatialEntity::player(
            player_id,
            self.config.player_start_position(),
            self.config.player_size,
        ));

        self.entities = entities;
        self.player_id = player_id;
        self.spawner = SpawnScheduler::new(&self.config, self.seed);
        self.state = SessionState::Playing;
        self.game_over_reason = None;
        self.hits = 0;
        self.idle_time = 0.0;
        self.obstacles_spawned = 0;
        self.elapsed = 0.0;
        self.time_ticks = 0;

        log::info!("Session reset (seed {})", self.seed);
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// A no-op returning no events once the session is over. Negative or
    /// non-finite `dt` is rejected without touching state.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<GameEvent>, SimError> {
        if self.state != SessionState::Playing {
            return Ok(Vec::new());
        }
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("Rejected tick with dt = {}", dt);
            return Err(SimError::InvalidDeltaTime(dt));
        }

        let mut events = Vec::new();
        self.time_ticks += 1;
        self.elapsed += dt;

        // Survival timer
        self.idle_time += f64::from(dt);
        if self.idle_time >= f64::from(self.config.survival_window) {
            self.finish(GameOverReason::Timeout, &mut events);
            return Ok(events);
        }

        // Motion; completed paths wait for collision resolution
        let completed = self.motion.advance(&mut self.entities, dt);

        // Collisions
        let contacts = self
            .resolver
            .resolve(&mut self.entities, self.player_id, &self.filter)?;
        for contact in contacts {
            self.hits += 1;
            log::info!(
                "Collision with obstacle {} at ({:.1}, {:.1}), hits: {}",
                contact.obstacle_id,
                contact.pos.x,
                contact.pos.y,
                self.hits
            );
            self.hooks.on_collision(contact.obstacle_id);
            events.push(GameEvent::Collision {
                obstacle_id: contact.obstacle_id,
                pos: contact.pos,
                hits: self.hits,
                shake_duration: self.config.collision_shake_duration,
            });
        }

        // Retirement (obstacles removed by a collision are already gone)
        for id in completed {
            if self.entities.remove(id).is_ok() {
                log::debug!("Obstacle {} retired", id);
                events.push(GameEvent::Retired { id });
            }
        }

        if self.hits >= self.config.hit_threshold {
            self.finish(GameOverReason::HitLimit, &mut events);
            return Ok(events);
        }

        // Spawning
        for request in self.spawner.tick(dt) {
            let id = self.spawn_obstacle(&request)?;
            events.push(GameEvent::Spawned {
                id,
                pos: request.start(),
            });
        }

        Ok(events)
    }

    /// Input event: move the player and refill the survival timer.
    ///
    /// Ignored once the session is over. Non-finite coordinates are
    /// rejected and the previous position kept.
    pub fn set_player_target(&mut self, x: f32, y: f32) -> Result<(), SimError> {
        if self.state != SessionState::Playing {
            return Ok(());
        }
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("Rejected player target ({}, {})", x, y);
            return Err(SimError::InvalidPosition { x, y });
        }

        let player = self.entities.get_mut(self.player_id)?;
        player.pos = Vec2::new(x, y);
        player.prev_pos = player.pos;
        self.idle_time = 0.0;
        Ok(())
    }

    /// Turn a spawn request into an obstacle in the registry
    pub fn spawn_obstacle(&mut self, request: &SpawnRequest) -> Result<EntityId, SimError> {
        if self.state != SessionState::Playing {
            return Err(SimError::SessionOver);
        }
        let path = MovementPath::new(request.start(), request.end(), request.duration)?;
        let id = self.entities.next_entity_id();
        self.entities
            .insert(SpatialEntity::obstacle(id, path, self.config.obstacle_size));
        self.obstacles_spawned += 1;

        log::debug!(
            "Spawned obstacle {} at y={:.1}, duration {:.2}s",
            id,
            request.y,
            request.duration
        );
        self.hooks.on_spawn(id);
        Ok(id)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            game_over_reason: self.game_over_reason,
            hit_count: self.hits,
            survival_time_remaining: self.survival_time_remaining(),
            score: self.score(),
            elapsed: self.elapsed,
            time_ticks: self.time_ticks,
            entities: self.entities.iter().map(EntitySnapshot::from).collect(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn hit_count(&self) -> u32 {
        self.hits
    }

    /// Seconds of idling left before a timeout, 0 once expired
    pub fn survival_time_remaining(&self) -> f32 {
        (f64::from(self.config.survival_window) - self.idle_time).max(0.0) as f32
    }

    /// Obstacles spawned so far times the per-obstacle score
    pub fn score(&self) -> u64 {
        self.obstacles_spawned * self.config.score_per_obstacle
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn entity(&self, id: EntityId) -> Result<&SpatialEntity, SimError> {
        self.entities.get(id)
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn finish(&mut self, reason: GameOverReason, events: &mut Vec<GameEvent>) {
        self.state = SessionState::GameOver;
        self.game_over_reason = Some(reason);
        for entity in self.entities.iter_mut() {
            entity.active = false;
        }

        log::info!(
            "Game over ({:?}) after {:.2}s, hits: {}, score: {}",
            reason,
            self.elapsed,
            self.hits,
            self.score()
        );
        self.hooks.on_game_over(reason);
        events.push(GameEvent::GameOver { reason });
    }
}
