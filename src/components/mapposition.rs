//! World-space position component.
//!
//! [`MapPosition`] is the pivot of a creature's sprite: the sprite is drawn
//! centered on it and its collider is centered on it too. Behavior, drag,
//! tweens and the resolver all write this component, but never in the same
//! frame for the same entity.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Pivot position of an entity in scene coordinates (y grows downward).
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
