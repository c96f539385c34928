//! Outbound notifications for the economy layer.
//!
//! The scene never calls into the store directly. It pushes
//! [`SceneNotice`]s here and the host hands them over through
//! [`SceneHost::drain_notices`](crate::host::SceneHost::drain_notices).

use bevy_ecs::prelude::Resource;

/// Currency credited when the boss leaves the scene.
pub const BOSS_REWARD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneNotice {
    BossRemoved,
    RewardGranted { amount: u32 },
}

#[derive(Resource, Debug, Default)]
pub struct SceneOutbox {
    pub notices: Vec<SceneNotice>,
}

impl SceneOutbox {
    pub fn push(&mut self, notice: SceneNotice) {
        self.notices.push(notice);
    }

    pub fn drain(&mut self) -> Vec<SceneNotice> {
        std::mem::take(&mut self.notices)
    }
}
