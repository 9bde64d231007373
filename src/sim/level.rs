//! Level registry
//!
//! Owns every entity, partitioned by variant. Collections are public fields:
//! the kinetics and collision passes borrow them directly (and disjointly).
//! There is no physics in here.

use serde::{Deserialize, Serialize};

use super::body::Element;
use super::state::{Bubble, Entity, Fruit, Npc, Platform, Player, Powerup};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub players: Vec<Player>,
    pub npcs: Vec<Npc>,
    pub fruits: Vec<Fruit>,
    pub bubbles: Vec<Bubble>,
    pub powerups: Vec<Powerup>,
    /// Next entity ID
    next_id: u32,
}

impl Level {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Add an entity to the collection matching its variant
    pub fn add_element(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        // Keep IDs unique when callers bring their own
        self.next_id = self.next_id.max(entity.id() + 1);
        match entity {
            Entity::Platform(e) => self.platforms.push(e),
            Entity::Player(e) => self.players.push(e),
            Entity::Npc(e) => self.npcs.push(e),
            Entity::Fruit(e) => self.fruits.push(e),
            Entity::Bubble(e) => self.bubbles.push(e),
            Entity::Powerup(e) => self.powerups.push(e),
        }
    }

    /// Number of elements advanced by kinetics (everything but platforms)
    pub fn dynamic_count(&self) -> usize {
        self.players.len()
            + self.npcs.len()
            + self.fruits.len()
            + self.bubbles.len()
            + self.powerups.len()
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|e| e.id());
        self.players.sort_by_key(|e| e.id());
        self.npcs.sort_by_key(|e| e.id());
        self.fruits.sort_by_key(|e| e.id());
        self.bubbles.sort_by_key(|e| e.id());
        self.powerups.sort_by_key(|e| e.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn unit() -> Vec2 {
        Vec2::new(31.0, 31.0)
    }

    #[test]
    fn test_add_element_classifies() {
        let tuning = Tuning::default();
        let mut level = Level::new();

        let id = level.next_entity_id();
        level.add_element(Platform::new(id, Vec2::ZERO, unit(), true));
        let id = level.next_entity_id();
        level.add_element(Player::new(id, Vec2::ZERO, unit(), &tuning));
        let id = level.next_entity_id();
        level.add_element(Npc::new(id, Vec2::ZERO, unit()));
        let id = level.next_entity_id();
        level.add_element(Fruit::new(id, Vec2::ZERO, unit()));
        let id = level.next_entity_id();
        level.add_element(Bubble::new(id, Vec2::ZERO, unit(), &tuning));
        let id = level.next_entity_id();
        level.add_element(Powerup::new(id, Vec2::ZERO, unit()));

        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.players.len(), 1);
        assert_eq!(level.npcs.len(), 1);
        assert_eq!(level.fruits.len(), 1);
        assert_eq!(level.bubbles.len(), 1);
        assert_eq!(level.powerups.len(), 1);
        assert_eq!(level.dynamic_count(), 5);
    }

    #[test]
    fn test_ids_stay_unique_with_caller_ids() {
        let mut level = Level::new();
        level.add_element(Fruit::new(10, Vec2::ZERO, unit()));
        assert_eq!(level.next_entity_id(), 11);
        assert_eq!(level.next_entity_id(), 12);
    }

    #[test]
    fn test_normalize_order() {
        let mut level = Level::new();
        level.add_element(Fruit::new(5, Vec2::ZERO, unit()));
        level.add_element(Fruit::new(2, Vec2::ZERO, unit()));
        level.normalize_order();
        let ids: Vec<u32> = level.fruits.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 5]);
    }
}
