use bevy_ecs::prelude::Resource;

/// Scene clock, advanced once per frame by
/// [`update_world_time`](crate::systems::time::update_world_time).
///
/// All durations in the scene (behavior timers, tweens, cooldowns, click
/// detection) are measured against `elapsed`, in seconds.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub elapsed: f32,
    /// Length of the current frame.
    pub delta: f32,
}
