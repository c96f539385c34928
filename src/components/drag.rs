//! Pointer interaction state.
//!
//! [`Draggable`] tracks one press/move/release cycle so that the input
//! handler can tell a click from a drag. While [`DragState::Dragging`], the
//! pointer owns the entity's position and the scheduler leaves it alone.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Pointer travel, in pixels, that turns a press into a drag.
pub const MOVE_THRESHOLD: f32 = 5.0;
/// Longest press, in seconds, still counted as a click.
pub const CLICK_THRESHOLD: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Pointer is down but has not travelled far enough to drag.
    Pressed { time: f32, start: Vector2 },
    Dragging,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Draggable {
    pub state: DragState,
}

impl Default for Draggable {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl Draggable {
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging)
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
