//! Obstacle motion along linear paths

use super::state::{EntityId, EntityRegistry};

/// Advances every active, path-driven entity. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSystem;

impl MotionSystem {
    /// Move active obstacles by `dt` along their paths.
    ///
    /// Records each entity's pre-move position in `prev_pos` and returns the
    /// ids whose path completed this tick, in id order. Completed entities
    /// stay in the registry; the caller retires them once collisions for
    /// this tick have been resolved. O(N) in the registry size.
    pub fn advance(&self, entities: &mut EntityRegistry, dt: f32) -> Vec<EntityId> {
        let mut completed = Vec::new();

        for entity in entities.iter_mut() {
            entity.prev_pos = entity.pos;
            if !entity.active {
                continue;
            }
            let Some(path) = entity.path.as_mut() else {
                continue;
            };

            entity.pos = path.advance(dt);
            if path.is_complete() {
                completed.push(entity.id);
            }
        }

        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{MovementPath, SpatialEntity};
    use glam::Vec2;

    fn setup() -> (EntityRegistry, EntityId, EntityId) {
        let mut registry = EntityRegistry::new();
        let player = registry.next_entity_id();
        registry.insert(SpatialEntity::player(
            player,
            Vec2::new(50.0, 150.0),
            Vec2::splat(20.0),
        ));

        let obstacle = registry.next_entity_id();
        let path = MovementPath::new(Vec2::new(420.0, 50.0), Vec2::new(-10.0, 50.0), 2.0).unwrap();
        registry.insert(SpatialEntity::obstacle(obstacle, path, Vec2::splat(20.0)));
        (registry, player, obstacle)
    }

    #[test]
    fn test_linear_interpolation() {
        let (mut registry, _, obstacle) = setup();
        let done = MotionSystem.advance(&mut registry, 0.5);
        assert!(done.is_empty());

        let e = registry.get(obstacle).unwrap();
        assert!((e.pos.x - 312.5).abs() < 1e-3);
        assert_eq!(e.pos.y, 50.0);
        assert_eq!(e.prev_pos, Vec2::new(420.0, 50.0));
    }

    #[test]
    fn test_completion_reported_once_path_ends() {
        let (mut registry, _, obstacle) = setup();
        assert!(MotionSystem.advance(&mut registry, 1.0).is_empty());
        assert_eq!(MotionSystem.advance(&mut registry, 1.0), vec![obstacle]);
        assert_eq!(registry.get(obstacle).unwrap().pos, Vec2::new(-10.0, 50.0));
    }

    #[test]
    fn test_player_not_moved() {
        let (mut registry, player, _) = setup();
        MotionSystem.advance(&mut registry, 1.5);
        assert_eq!(registry.get(player).unwrap().pos, Vec2::new(50.0, 150.0));
    }

    #[test]
    fn test_inactive_skipped() {
        let (mut registry, _, obstacle) = setup();
        registry.get_mut(obstacle).unwrap().active = false;
        assert!(MotionSystem.advance(&mut registry, 5.0).is_empty());
        assert_eq!(registry.get(obstacle).unwrap().pos, Vec2::new(420.0, 50.0));
    }
}
