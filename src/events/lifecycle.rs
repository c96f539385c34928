//! Creature lifecycle events.
//!
//! The host diffs the desired creature list against the registry and
//! triggers one event per difference. See [`crate::systems::lifecycle`] for
//! the observers.

use bevy_ecs::prelude::*;

use crate::components::creature::CreatureSpec;

/// Bring a creature into the scene. Ignored if the name is already present
/// or queued.
#[derive(Event, Debug, Clone)]
pub struct AddCreatureEvent {
    pub spec: CreatureSpec,
}

/// Take a creature out of the scene by name.
#[derive(Event, Debug, Clone)]
pub struct RemoveCreatureEvent {
    pub name: String,
}

/// Update the level of a live creature and rebuild its glow rings.
#[derive(Event, Debug, Clone)]
pub struct LevelChangedEvent {
    pub name: String,
    pub level: Option<u8>,
}
