//! Collision event.
//!
//! The detector triggers [`CollisionEvent`] for an overlapping pair that is
//! out of cooldown and passed its trigger roll. The cooldown is already
//! stamped when the event fires; the resolver
//! ([`crate::systems::resolver::resolve_collision`]) only decides what the
//! collision does.
use bevy_ecs::prelude::*;

/// Event fired when two creatures collide.
///
/// No ordering guarantees are provided between [`CollisionEvent::a`] and
/// [`CollisionEvent::b`], except that when a boss is involved it is `a`.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
