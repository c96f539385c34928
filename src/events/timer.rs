//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, the timer system removes it and triggers a [`TimerEvent`]. The
//! observer lives in [`crate::systems::time::on_timer`].

use bevy_ecs::prelude::*;

use crate::components::timer::TimerAction;

/// Event emitted when a timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The action configured on the timer.
    pub action: TimerAction,
}
