//! Tween completion events.

use bevy_ecs::prelude::*;

use crate::components::tween::TweenFinish;

/// Triggered once when a [`TweenPosition`](crate::components::tween::TweenPosition)
/// reaches its destination. The component is already removed by then.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenFinishedEvent {
    pub entity: Entity,
    pub action: TweenFinish,
}
