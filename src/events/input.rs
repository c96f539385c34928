//! Pointer events.
//!
//! A [`PointerEvent`] is addressed to one creature: the windowed host
//! hit-tests the press and then keeps routing to the captured creature until
//! release. Headless hosts trigger these directly.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PointerEvent {
    pub entity: Entity,
    pub kind: PointerKind,
    /// Pointer position in scene coordinates.
    pub pos: Vector2,
    /// Scene time of the event, in seconds.
    pub time: f32,
}
