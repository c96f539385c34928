//! Viewport resource.
//!
//! The scene is a strip along the bottom of the page: as wide as the window
//! and a fixed height. The host updates this resource on resize; nothing
//! else writes it.

use bevy_ecs::prelude::Resource;

/// Scene rendering surface size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Pivot y at which a sprite of `display_h` stands on the ground.
    pub fn ground_y(&self, display_h: f32) -> f32 {
        self.h - display_h * 0.5
    }

    /// Keep a sprite of half-width `half_w` fully inside the viewport.
    ///
    /// When the viewport is narrower than the sprite, the sprite is centered.
    pub fn clamp_x(&self, x: f32, half_w: f32) -> f32 {
        if self.w <= half_w * 2.0 {
            return self.w * 0.5;
        }
        x.clamp(half_w, self.w - half_w)
    }
}
