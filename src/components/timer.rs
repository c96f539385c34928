// Counts a number of seconds and then triggers a TimerEvent.
use bevy_ecs::prelude::Component;

/// What to do when a [`Timer`] expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Second beat of the boss flourish: switch from `cry` to `attack`.
    BossAttack,
    /// End of the boss flourish: pick a new behavior.
    BossReroll,
    /// The defeated boss leaves the scene.
    RemoveBoss,
}

/// One-shot countdown. The timer system removes it when it fires.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub action: TimerAction,
}

impl Timer {
    pub fn new(duration: f32, action: TimerAction) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            action,
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
