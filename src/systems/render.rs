use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{BossState, Creature};
use crate::components::mapposition::MapPosition;
use crate::components::overlay::{HEALTH_BAR_HEIGHT, HEALTH_BAR_WIDTH, Overlay, OverlayOf};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::debugmode::DebugMode;
use crate::resources::registry::EntityRegistry;
use crate::resources::texturestore::TextureStore;
use crate::systems::resolver::DEFEAT_COUNT;

const BACKGROUND: Color = Color::new(160, 214, 236, 255);
const BAR_BACK: Color = Color::new(40, 40, 40, 200);
const BAR_FILL: Color = Color::new(220, 40, 40, 255);

enum Drawable {
    Sprite(Sprite),
    Overlay { overlay: Overlay, owner_size: f32 },
}

/// Draw the scene in screen space: sprites and overlays sorted by z, then
/// debug outlines if [`DebugMode`] is present.
///
/// The scene is the whole window, so there is no camera and no culling.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle) {
    d.clear_background(BACKGROUND);

    let mut to_draw: Vec<(ZIndex, Vector2, Drawable)> = {
        let mut q = world.query::<(&Sprite, &MapPosition, &ZIndex)>();
        q.iter(world)
            .map(|(s, p, z)| (*z, p.pos, Drawable::Sprite(s.clone())))
            .collect()
    };
    {
        let mut q = world.query::<(&Overlay, &OverlayOf, &MapPosition, &ZIndex)>();
        let overlays: Vec<_> = q
            .iter(world)
            .map(|(o, owner, p, z)| (*z, p.pos, *o, owner.0))
            .collect();
        for (z, pos, overlay, owner) in overlays {
            let owner_size = world.get::<Sprite>(owner).map_or(0.0, |s| s.width);
            to_draw.push((z, pos, Drawable::Overlay { overlay, owner_size }));
        }
    }

    // Stable: overlays of equal z stay after the sprites they decorate.
    to_draw.sort_by_key(|(z, _, _)| *z);

    let textures = world.non_send_resource::<TextureStore>();
    for (_, pos, drawable) in to_draw.iter() {
        match drawable {
            Drawable::Sprite(sprite) => {
                let Some(tex) = textures.get(&sprite.tex_key) else {
                    continue;
                };
                // Negative source width mirrors the frame in place.
                let src_w = if sprite.flip_h {
                    -sprite.frame_size
                } else {
                    sprite.frame_size
                };
                let src = Rectangle::new(sprite.offset.x, sprite.offset.y, src_w, sprite.frame_size);
                let dest = Rectangle::new(pos.x, pos.y, sprite.width, sprite.height);
                d.draw_texture_pro(tex, src, dest, sprite.origin(), 0.0, Color::WHITE);
            }
            Drawable::Overlay {
                overlay,
                owner_size,
            } => draw_overlay(d, *pos, overlay, *owner_size),
        }
    }

    if world.contains_resource::<DebugMode>() {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
        render_debug_ui(world, d);
    }
}

fn draw_overlay(d: &mut RaylibDrawHandle, pos: Vector2, overlay: &Overlay, owner_size: f32) {
    let left = pos.x - HEALTH_BAR_WIDTH * 0.5;
    let top = pos.y - HEALTH_BAR_HEIGHT * 0.5;
    match *overlay {
        Overlay::HealthBarBack => {
            d.draw_rectangle_rec(
                Rectangle::new(left, top, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
                BAR_BACK,
            );
        }
        Overlay::HealthBarFill { ratio } => {
            d.draw_rectangle_rec(
                Rectangle::new(left, top, HEALTH_BAR_WIDTH * ratio, HEALTH_BAR_HEIGHT),
                BAR_FILL,
            );
        }
        Overlay::GlowRing { tier, ring } => {
            let alpha = 200u8.saturating_sub(ring * 30);
            let color = if tier >= 5 {
                Color::new(255, 120, 220, alpha)
            } else {
                Color::new(255, 215, 0, alpha)
            };
            d.draw_circle_lines(
                pos.x as i32,
                pos.y as i32,
                Overlay::ring_radius(ring, owner_size),
                color,
            );
        }
    }
}

fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    let creatures = world.query::<&Creature>().iter(world).count();
    let boss_hits = world
        .resource::<EntityRegistry>()
        .boss()
        .and_then(|boss| world.get::<BossState>(boss))
        .map(|state| format!("{}/{DEFEAT_COUNT}", state.collision_count))
        .unwrap_or_else(|| "-".to_owned());
    let text = format!("Creatures: {creatures} | Boss hits: {boss_hits}");
    d.draw_text(&text, 10, 24, 10, Color::BLACK);
}
