//! Game configuration
//!
//! Every constant the host may override. Loaded from JSON; missing fields
//! fall back to the defaults in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Game tuning, overridable by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Spawning ===
    /// Seconds per spawn batch
    pub spawn_interval: f32,
    /// Obstacles per batch (0 disables spawning)
    pub spawn_batch_size: u32,
    /// Shortest traversal time (fastest obstacle)
    pub min_traversal_duration: f32,
    /// Longest traversal time (slowest obstacle)
    pub max_traversal_duration: f32,

    // === Rules ===
    /// Collisions that end the run
    pub hit_threshold: u32,
    /// Idle seconds before the run ends
    pub survival_window: f32,

    // === Bounding sizes (full extents) ===
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
    /// Player start position as a fraction of the field
    pub player_start: Vec2,

    // === Feedback / scoring ===
    /// Shake duration requested per collision
    pub collision_shake_duration: f32,
    pub score_per_obstacle: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            spawn_interval: SPAWN_INTERVAL,
            spawn_batch_size: SPAWN_BATCH_SIZE,
            min_traversal_duration: MIN_TRAVERSAL_DURATION,
            max_traversal_duration: MAX_TRAVERSAL_DURATION,

            hit_threshold: HIT_THRESHOLD,
            survival_window: SURVIVAL_WINDOW,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),

            collision_shake_duration: COLLISION_SHAKE_DURATION,
            score_per_obstacle: SCORE_PER_OBSTACLE,
        }
    }
}

impl GameConfig {
    /// Create a config for a field of the given size, other values default
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: field {}x{}, {} obstacles per {}s",
            config.field_width,
            config.field_height,
            config.spawn_batch_size,
            config.spawn_interval
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Seconds between individual spawns within a batch
    pub fn spawn_slot(&self) -> f32 {
        self.spawn_interval / self.spawn_batch_size.max(1) as f32
    }

    /// Player position at session start
    pub fn player_start_position(&self) -> Vec2 {
        Vec2::new(
            self.field_width * self.player_start.x,
            self.field_height * self.player_start.y,
        )
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SimError> {
        fn positive(name: &str, v: f32) -> Result<(), SimError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidConfig(format!(
                    "{} must be positive and finite (got {})",
                    name, v
                )))
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("min_traversal_duration", self.min_traversal_duration)?;
        positive("max_traversal_duration", self.max_traversal_duration)?;
        positive("survival_window", self.survival_window)?;
        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        positive("obstacle_size.x", self.obstacle_size.x)?;
        positive("obstacle_size.y", self.obstacle_size.y)?;

        if self.spawn_batch_size > 0 && self.spawn_slot() < MIN_SPAWN_SLOT {
            return Err(SimError::InvalidConfig(format!(
                "spawn_interval / spawn_batch_size must be at least {}s (got {})",
                MIN_SPAWN_SLOT,
                self.spawn_slot()
            )));
        }
        if self.min_traversal_duration > self.max_traversal_duration {
            return Err(SimError::InvalidConfig(format!(
                "min_traversal_duration {} exceeds max_traversal_duration {}",
                self.min_traversal_duration, self.max_traversal_duration
            )));
        }
        if self.obstacle_size.y > self.field_height {
            return Err(SimError::InvalidConfig(format!(
                "obstacle height {} does not fit field height {}",
                self.obstacle_size.y, self.field_height
            )));
        }
        if self.hit_threshold == 0 {
            return Err(SimError::InvalidConfig(
                "hit_threshold must be at least 1".to_string(),
            ));
        }
        if !(self.collision_shake_duration.is_finite() && self.collision_shake_duration >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "collision_shake_duration must be non-negative (got {})",
                self.collision_shake_duration
            )));
        }
        if !crate::is_finite_point(self.player_start) {
            return Err(SimError::InvalidConfig(
                "player_start must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_batch_size, 3);
        assert_eq!(config.hit_threshold, 2);
        assert_eq!(config.survival_window, 5.0);
        assert!((config.spawn_slot() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = GameConfig::from_json(r#"{ "field_width": 400.0, "hit_threshold": 3 }"#)
            .expect("valid config");
        assert_eq!(config.field_width, 400.0);
        assert_eq!(config.hit_threshold, 3);
        assert_eq!(config.field_height, FIELD_HEIGHT);
        assert_eq!(config.spawn_batch_size, SPAWN_BATCH_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::with_field(400.0, 300.0);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.min_traversal_duration = 5.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.field_width = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.hit_threshold = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::with_field(100.0, 20.0);
        config.obstacle_size = Vec2::new(10.0, 30.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_spawn_slot() {
        let config = GameConfig {
            spawn_interval: 1e-9,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let config = GameConfig {
            spawn_interval: 0.01,
            spawn_batch_size: 1000,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        // Irrelevant when spawning is off
        let config = GameConfig {
            spawn_interval: 1e-9,
            spawn_batch_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(SimError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_zero_batch_disables_spawning_but_is_valid() {
        let config = GameConfig {
            spawn_batch_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_player_start_position() {
        let config = GameConfig::with_field(400.0, 300.0);
        assert_eq!(config.player_start_position(), Vec2::new(40.0, 150.0));
    }
}
