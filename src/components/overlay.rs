//! Cosmetic overlays owned by a creature.
//!
//! Overlays are separate entities (so they can sit on their own draw layer)
//! that follow their owner every frame. The owner keeps the handles in
//! [`OverlayHandles`]; removing the owner despawns every handle with it.
//!
//! - The boss gets a health bar: a background and a fill whose width tracks
//!   the collisions left before defeat.
//! - Leveled regular creatures get one glow ring per level.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::{Component, Entity};

use crate::components::creature::MAX_LEVEL;

/// Width of the boss health bar in pixels.
pub const HEALTH_BAR_WIDTH: f32 = 100.0;
/// Height of the boss health bar in pixels.
pub const HEALTH_BAR_HEIGHT: f32 = 10.0;

/// Handles to the overlay entities of one creature.
#[derive(Component, Debug, Clone, Default)]
pub struct OverlayHandles {
    /// `[background, fill]`, boss only.
    pub health_bar: Option<[Entity; 2]>,
    pub glow_rings: ArrayVec<Entity, { MAX_LEVEL as usize }>,
}

impl OverlayHandles {
    /// Every handle, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        self.health_bar
            .iter()
            .flatten()
            .copied()
            .chain(self.glow_rings.iter().copied())
    }
}

/// Back-reference from an overlay entity to the creature it decorates.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOf(pub Entity);

/// What an overlay entity draws.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    HealthBarBack,
    /// `ratio` in [0, 1] of the bar still filled.
    HealthBarFill { ratio: f32 },
    /// Ring `ring` (0-based) of a creature at glow `tier`.
    GlowRing { tier: u8, ring: u8 },
}

impl Overlay {
    /// Radius of a glow ring around a sprite of the given display size.
    pub fn ring_radius(ring: u8, sprite_size: f32) -> f32 {
        sprite_size * 0.35 + ring as f32 * 4.0
    }
}
