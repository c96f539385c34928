//! Name-keyed registry of live creatures.
//!
//! Every creature is registered under its unique name when instantiated and
//! deregistered when removed. The boss additionally occupies the single boss
//! slot, which is how the rest of the scene asks "is a boss present?".

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Default)]
pub struct EntityRegistry {
    by_name: FxHashMap<String, Entity>,
    boss: Option<Entity>,
}

impl EntityRegistry {
    /// Register a creature. Returns `false` if the name is taken, or if
    /// `is_boss` and a boss is already registered.
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity, is_boss: bool) -> bool {
        let name = name.into();
        if self.by_name.contains_key(&name) || (is_boss && self.boss.is_some()) {
            return false;
        }
        self.by_name.insert(name, entity);
        if is_boss {
            self.boss = Some(entity);
        }
        true
    }

    /// Deregister a creature by name, returning its entity.
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let entity = self.by_name.remove(name)?;
        if self.boss == Some(entity) {
            self.boss = None;
        }
        Some(entity)
    }

    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn boss(&self) -> Option<Entity> {
        self.boss
    }

    pub fn has_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_insert_is_unique_by_name() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut reg = EntityRegistry::default();

        assert!(reg.insert("d1", a, false));
        assert!(!reg.insert("d1", b, false));
        assert_eq!(reg.get("d1"), Some(a));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_only_one_boss() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut reg = EntityRegistry::default();

        assert!(reg.insert("whale", a, true));
        assert!(!reg.insert("whale2", b, true));
        assert_eq!(reg.boss(), Some(a));
        assert!(!reg.contains("whale2"));
    }

    #[test]
    fn test_removing_boss_clears_slot() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut reg = EntityRegistry::default();
        reg.insert("whale", a, true);

        assert_eq!(reg.remove("whale"), Some(a));
        assert!(!reg.has_boss());
        assert!(reg.is_empty());
        assert_eq!(reg.remove("whale"), None);
    }
}
