//! Player contact detection and resolution
//!
//! Obstacles are tested with the rectangle they swept this tick, so a large
//! `dt` cannot carry one straight through the player.

use glam::Vec2;

use super::filter::CollisionFilter;
use super::state::{EntityId, EntityRegistry};
use crate::error::SimError;

/// A resolved player contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub obstacle_id: EntityId,
    /// Obstacle position when it was removed
    pub pos: Vec2,
}

/// Finds and resolves player contacts. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Resolve every contact between the player and the rest of the registry.
    ///
    /// Each contacting entity whose category pair passes `filter` is removed
    /// and reported once, in increasing id order. The player is never
    /// removed. Any number of contacts may resolve in a single call.
    pub fn resolve(
        &self,
        entities: &mut EntityRegistry,
        player_id: EntityId,
        filter: &CollisionFilter,
    ) -> Result<Vec<CollisionEvent>, SimError> {
        let player = entities.get(player_id)?;
        if !player.active {
            return Ok(Vec::new());
        }
        let player_bounds = player.bounds();
        let player_category = player.category;

        // Registry iterates in id order
        let contacts: Vec<EntityId> = entities
            .iter()
            .filter(|e| e.id != player_id && e.active)
            .filter(|e| filter.should_test(player_category, e.category))
            .filter(|e| e.swept_bounds().overlaps(&player_bounds))
            .map(|e| e.id)
            .collect();

        let mut events = Vec::with_capacity(contacts.len());
        for id in contacts {
            let obstacle = entities.remove(id)?;
            events.push(CollisionEvent {
                obstacle_id: id,
                pos: obstacle.pos,
            });
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::filter::CollisionCategory;
    use crate::sim::state::{MovementPath, SpatialEntity};

    fn player_registry() -> (EntityRegistry, EntityId) {
        let mut registry = EntityRegistry::new();
        let player = registry.next_entity_id();
        registry.insert(SpatialEntity::player(
            player,
            Vec2::new(50.0, 150.0),
            Vec2::splat(20.0),
        ));
        (registry, player)
    }

    fn add_obstacle(registry: &mut EntityRegistry, pos: Vec2) -> EntityId {
        let id = registry.next_entity_id();
        let path = MovementPath::new(pos, Vec2::new(-10.0, pos.y), 2.0).unwrap();
        registry.insert(SpatialEntity::obstacle(id, path, Vec2::splat(20.0)));
        id
    }

    #[test]
    fn test_overlap_removes_obstacle_and_keeps_player() {
        let (mut registry, player) = player_registry();
        let hit = add_obstacle(&mut registry, Vec2::new(55.0, 150.0));
        let miss = add_obstacle(&mut registry, Vec2::new(300.0, 150.0));

        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::default())
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].obstacle_id, hit);
        assert!(!registry.contains(hit));
        assert!(registry.contains(miss));
        assert!(registry.contains(player));
    }

    #[test]
    fn test_multiple_contacts_in_id_order() {
        let (mut registry, player) = player_registry();
        let a = add_obstacle(&mut registry, Vec2::new(45.0, 150.0));
        let b = add_obstacle(&mut registry, Vec2::new(50.0, 145.0));
        let c = add_obstacle(&mut registry, Vec2::new(58.0, 155.0));

        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::default())
            .unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.obstacle_id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_filter_respected() {
        let (mut registry, player) = player_registry();
        let id = add_obstacle(&mut registry, Vec2::new(50.0, 150.0));

        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::empty())
            .unwrap();
        assert!(events.is_empty());

        registry.get_mut(id).unwrap().category = CollisionCategory::NONE;
        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::default())
            .unwrap();
        assert!(events.is_empty());
        assert!(registry.contains(id));
    }

    #[test]
    fn test_swept_contact() {
        let (mut registry, player) = player_registry();
        let id = add_obstacle(&mut registry, Vec2::new(420.0, 150.0));
        {
            let e = registry.get_mut(id).unwrap();
            e.prev_pos = Vec2::new(420.0, 150.0);
            e.pos = Vec2::new(-10.0, 150.0);
        }

        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::default())
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pos, Vec2::new(-10.0, 150.0));
    }

    #[test]
    fn test_inactive_obstacle_ignored() {
        let (mut registry, player) = player_registry();
        let id = add_obstacle(&mut registry, Vec2::new(50.0, 150.0));
        registry.get_mut(id).unwrap().active = false;

        let events = CollisionResolver
            .resolve(&mut registry, player, &CollisionFilter::default())
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_missing_player_is_not_found() {
        let (mut registry, player) = player_registry();
        registry.remove(player).unwrap();
        let result = CollisionResolver.resolve(&mut registry, player, &CollisionFilter::default());
        assert!(matches!(result, Err(SimError::NotFound(id)) if id == player));
    }
}
