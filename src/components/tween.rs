//! Position tween component.
//!
//! [`TweenPosition`] moves an entity's [`MapPosition`](super::mapposition::MapPosition)
//! from one point to another over a fixed duration. While it is attached the
//! tween owns the position: the behavior scheduler, movement and collision
//! detection all skip the entity. When it finishes the tween system removes
//! it and triggers a [`TweenFinishedEvent`](crate::events::tween::TweenFinishedEvent)
//! carrying the [`TweenFinish`] follow-up.
//!
//! See [`crate::systems::tween`] for the update system.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Lands and bounces a few times with decreasing height.
    BounceOut,
}

/// Follow-up applied once a tween reaches its destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TweenFinish {
    /// Hand control straight back to the scheduler.
    Resume,
    /// Hand control back and pick a fresh behavior right away.
    Reroll,
    /// End of a collision launch: creatures fall back to the ground.
    Landed,
    /// End of the grounding bounce: creatures start walking again.
    Grounded,
}

#[derive(Component, Clone, Debug)]
pub struct TweenPosition {
    /// Starting position.
    pub from: Vector2,
    /// Ending position.
    pub to: Vector2,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Current time within the tween.
    pub time: f32,
    /// What happens when the tween ends.
    pub on_finish: TweenFinish,
}

impl TweenPosition {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        TweenPosition {
            from,
            to,
            duration,
            easing: Easing::Linear,
            time: 0.0,
            on_finish: TweenFinish::Resume,
        }
    }
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    pub fn then(mut self, on_finish: TweenFinish) -> Self {
        self.on_finish = on_finish;
        self
    }
    pub fn finished(&self) -> bool {
        self.time >= self.duration
    }
}
