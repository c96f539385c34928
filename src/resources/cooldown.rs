//! Per-pair collision cooldown bookkeeping.
//!
//! A resolved collision stamps the unordered name pair with the current scene
//! time; the pair is ignored by the detector until the cooldown has elapsed.
//! Pairs are independent of each other.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Seconds during which the same pair cannot collide again.
pub const COLLISION_COOLDOWN: f32 = 2.0;

#[derive(Resource, Debug, Default)]
pub struct CollisionCooldowns {
    stamps: FxHashMap<(String, String), f32>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}

impl CollisionCooldowns {
    pub fn is_cooling(&self, a: &str, b: &str, now: f32) -> bool {
        self.stamps
            .get(&pair_key(a, b))
            .is_some_and(|stamp| now - stamp < COLLISION_COOLDOWN)
    }

    pub fn stamp(&mut self, a: &str, b: &str, now: f32) {
        self.stamps.insert(pair_key(a, b), now);
    }

    /// Drop every pair involving `name`.
    pub fn forget(&mut self, name: &str) {
        self.stamps.retain(|(a, b), _| a != name && b != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered() {
        let mut cd = CollisionCooldowns::default();
        cd.stamp("b", "a", 1.0);
        assert!(cd.is_cooling("a", "b", 1.5));
        assert!(cd.is_cooling("b", "a", 1.5));
    }

    #[test]
    fn test_cooldown_expires() {
        let mut cd = CollisionCooldowns::default();
        cd.stamp("a", "b", 1.0);
        assert!(cd.is_cooling("a", "b", 2.99));
        assert!(!cd.is_cooling("a", "b", 3.0));
    }

    #[test]
    fn test_pairs_are_independent() {
        let mut cd = CollisionCooldowns::default();
        cd.stamp("a", "b", 1.0);
        assert!(!cd.is_cooling("a", "c", 1.0));
    }

    #[test]
    fn test_forget_drops_pairs_of_removed_creature() {
        let mut cd = CollisionCooldowns::default();
        cd.stamp("a", "b", 1.0);
        cd.stamp("c", "d", 1.0);
        cd.forget("b");
        assert!(!cd.is_cooling("a", "b", 1.0));
        assert!(cd.is_cooling("c", "d", 1.0));
    }
}
