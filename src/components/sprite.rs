use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Sprite drawn from a sprite sheet.
///
/// `frame_size` is the square source cell on the sheet; `width`/`height` is
/// the size on screen (the boss is drawn scaled up). `offset` selects the
/// current frame and is written by the animation system. The sprite is drawn
/// centered on the entity's position; `flip_h` mirrors it to face left.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub frame_size: f32,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, frame_size: f32, scale: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            frame_size,
            width: frame_size * scale,
            height: frame_size * scale,
            offset: Vector2::zero(),
            flip_h: false,
        }
    }

    /// Pivot-relative origin used when drawing.
    pub fn origin(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }
}
