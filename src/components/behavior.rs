//! Behavior scheduling state.
//!
//! A [`Behavior`] holds the {moving, idle} mode that governs whether the
//! movement system integrates the entity's position, plus the countdown
//! until the next re-roll. The move target lives inside
//! [`BehaviorMode::Moving`], so an idle entity cannot carry a stale target.
//!
//! See [`crate::systems::behavior`] for the scheduler.

use bevy_ecs::prelude::Component;

/// Movement mode of a creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorMode {
    /// Walking toward `target_x`.
    Moving { target_x: f32 },
    /// Standing still, playing an idle sub-state.
    Idle,
}

/// Per-entity behavior scheduler state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Behavior {
    pub mode: BehaviorMode,
    /// Horizontal units advanced per tick while moving.
    pub move_speed: f32,
    /// Seconds until the next re-roll.
    pub timer: f32,
    /// `1.0` walks right, `-1.0` walks left.
    pub direction: f32,
    /// True while chasing the boss instead of following the timer.
    pub pursuing: bool,
    /// Set on the tick of a re-roll; movement waits for the next tick.
    pub fresh: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Behavior {
    pub fn new(move_speed: f32) -> Self {
        Self {
            mode: BehaviorMode::Idle,
            move_speed,
            timer: 0.0,
            direction: 1.0,
            pursuing: false,
            fresh: false,
        }
    }

    /// The x-coordinate being walked to, if moving.
    pub fn move_target(&self) -> Option<f32> {
        match self.mode {
            BehaviorMode::Moving { target_x } => Some(target_x),
            BehaviorMode::Idle => None,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.mode, BehaviorMode::Moving { .. })
    }

    /// Start walking from `from_x` toward `target_x`, facing the target.
    pub fn walk_to(&mut self, from_x: f32, target_x: f32) {
        self.mode = BehaviorMode::Moving { target_x };
        self.direction = if target_x > from_x { 1.0 } else { -1.0 };
    }

    /// Stop and wait `timer` seconds before the next re-roll.
    pub fn rest(&mut self, timer: f32) {
        self.mode = BehaviorMode::Idle;
        self.timer = timer;
    }

    /// Force a re-roll on the next scheduler tick.
    pub fn expire(&mut self) {
        self.timer = 0.0;
    }

    /// Whether the sprite should be mirrored.
    pub fn faces_left(&self) -> bool {
        self.direction < 0.0
    }
}
