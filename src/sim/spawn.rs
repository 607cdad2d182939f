//! Timed obstacle spawning
//!
//! Decides when obstacles appear and with what parameters. It never creates
//! entities itself; the session turns each [`SpawnRequest`] into an obstacle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::{MAX_SPAWNS_PER_TICK, TIME_EPSILON};

/// Parameters for one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Row the obstacle travels along
    pub y: f32,
    /// Seconds to cross the field
    pub duration: f32,
    /// Just past the right edge
    pub start_x: f32,
    /// Just past the left edge
    pub end_x: f32,
}

impl SpawnRequest {
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.start_x, self.y)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.end_x, self.y)
    }
}

/// Emits spawn requests on a fixed cadence: `batch_size` obstacles per
/// `interval`, one per slot of `interval / batch_size` seconds.
#[derive(Debug, Clone)]
pub struct SpawnScheduler<R = Pcg32> {
    rng: R,
    accumulator: f32,
    slot: f32,
    batch_size: u32,
    field: Vec2,
    obstacle_half: Vec2,
    min_duration: f32,
    max_duration: f32,
}

impl SpawnScheduler<Pcg32> {
    /// Scheduler driven by a PCG stream seeded from `seed`
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnScheduler<R> {
    /// Scheduler driven by any RNG (expects a validated config)
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        Self {
            rng,
            accumulator: 0.0,
            slot: config.spawn_slot(),
            batch_size: config.spawn_batch_size,
            field: Vec2::new(config.field_width, config.field_height),
            obstacle_half: config.obstacle_size * 0.5,
            min_duration: config.min_traversal_duration,
            max_duration: config.max_traversal_duration,
        }
    }

    /// Accumulate `dt` and emit one request per slot crossed, at most
    /// `MAX_SPAWNS_PER_TICK`. Slots beyond the cap are dropped.
    pub fn tick(&mut self, dt: f32) -> Vec<SpawnRequest> {
        if self.batch_size == 0 {
            return Vec::new();
        }

        self.accumulator += dt;
        let slots = ((self.accumulator + TIME_EPSILON) / self.slot).floor();
        if slots.is_nan() || slots < 1.0 {
            return Vec::new();
        }

        let count = if slots > MAX_SPAWNS_PER_TICK as f32 {
            log::warn!(
                "Spawn backlog of {} slots capped at {}",
                slots,
                MAX_SPAWNS_PER_TICK
            );
            self.accumulator = 0.0;
            MAX_SPAWNS_PER_TICK
        } else {
            // Absorb the epsilon overshoot so it can't build up
            self.accumulator = (self.accumulator - slots * self.slot).max(0.0);
            slots as usize
        };
        (0..count).map(|_| self.roll()).collect()
    }

    /// Time banked toward the next slot
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    fn roll(&mut self) -> SpawnRequest {
        let y = self
            .rng
            .random_range(self.obstacle_half.y..=self.field.y - self.obstacle_half.y);
        let duration = self
            .rng
            .random_range(self.min_duration..=self.max_duration);

        SpawnRequest {
            y,
            duration,
            start_x: self.field.x + self.obstacle_half.x,
            end_x: -self.obstacle_half.x,
        }
    }
}
