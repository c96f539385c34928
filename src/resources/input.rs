//! Pointer capture resource.
//!
//! A press on a creature captures the pointer: every following move and the
//! release go to that creature, wherever the pointer is, until the release.
//! Removing the captured creature releases the capture.

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerCapture {
    pub entity: Option<Entity>,
}

impl PointerCapture {
    pub fn capture(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    pub fn release(&mut self) -> Option<Entity> {
        self.entity.take()
    }

    /// Release the capture if it is held by `entity`.
    pub fn release_if(&mut self, entity: Entity) {
        if self.entity == Some(entity) {
            self.entity = None;
        }
    }
}
