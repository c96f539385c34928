//! Animation systems.
//!
//! - [`animation`] advances animations based on elapsed time and updates the
//!   visible sprite frame.
//! - [`play_state`] switches a creature's logical state and picks the clip to
//!   play for it, falling back to `walk` when the sheet has no such row.
//!
//! # Animation Flow
//!
//! 1. Clips are built per sheet in [`AnimationStore`] when the sheet loads
//! 2. Entities carry an [`Animation`] naming their sheet, state and clip
//! 3. The `animation` system advances frames at the clip `fps` and writes the
//!    frame's sheet offset into [`Sprite::offset`]

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, clip_key};
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite), With<MapPosition>>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim_comp, mut sprite) in query.iter_mut() {
        let Some(clip) = animation_store.animations.get(&anim_comp.clip_key) else {
            continue;
        };
        anim_comp.elapsed_time += time.delta;

        let frame_duration = 1.0 / clip.fps;
        while anim_comp.elapsed_time >= frame_duration {
            anim_comp.elapsed_time -= frame_duration;
            anim_comp.frame_index += 1;
            if anim_comp.frame_index >= clip.frame_count {
                anim_comp.frame_index = 0;
            }
        }

        sprite.offset = clip.frame_offset(anim_comp.frame_index);
    }
}

/// Switch `anim` to `state`. The logical state is always recorded; the clip
/// restarts only when it actually changes.
pub fn play_state(anim: &mut Animation, state: &str, store: &AnimationStore) {
    if anim.state == state {
        return;
    }
    anim.state = state.to_owned();
    let key = store
        .resolve(state, &anim.sheet)
        .unwrap_or_else(|| clip_key(state, &anim.sheet));
    if anim.clip_key != key {
        anim.clip_key = key;
        anim.frame_index = 0;
        anim.elapsed_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::catalog::{EVIL_WHALE, SWORD_DOLPHIN, SpriteCatalog};

    fn store() -> AnimationStore {
        let catalog = SpriteCatalog::builtin();
        let mut store = AnimationStore::default();
        store
            .register_sheet(catalog.get(SWORD_DOLPHIN).unwrap(), 640, 10.0)
            .unwrap();
        store
            .register_sheet(catalog.get(EVIL_WHALE).unwrap(), 512, 10.0)
            .unwrap();
        store
    }

    fn make_world(state: &str, sheet: &str) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(store());
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..Default::default()
        });
        let anim = Animation::new(sheet, state);
        let entity = world
            .spawn((
                MapPosition::new(0.0, 0.0),
                Sprite::new(sheet, 128.0, 1.0),
                anim,
            ))
            .id();
        (world, entity)
    }

    #[test]
    fn test_animation_advances_one_frame_per_period() {
        let (mut world, entity) = make_world("walk", SWORD_DOLPHIN);
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);

        schedule.run(&mut world);
        let anim = world.get::<Animation>(entity).unwrap();
        assert_eq!(anim.frame_index, 1);
        let sprite = world.get::<Sprite>(entity).unwrap();
        assert_eq!((sprite.offset.x, sprite.offset.y), (128.0, 128.0));
    }

    #[test]
    fn test_animation_loops() {
        let (mut world, entity) = make_world("walk", SWORD_DOLPHIN);
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        for _ in 0..4 {
            schedule.run(&mut world);
        }
        assert_eq!(world.get::<Animation>(entity).unwrap().frame_index, 0);
    }

    #[test]
    fn test_play_state_keeps_logical_state_on_fallback() {
        let store = store();
        let mut anim = Animation::new(SWORD_DOLPHIN, "walk");
        play_state(&mut anim, "drop", &store);
        assert_eq!(anim.state, "drop");
        assert_eq!(anim.clip_key, "walk-Sword Dolphin");
    }

    #[test]
    fn test_play_state_restarts_clip_on_change() {
        let store = store();
        let mut anim = Animation::new(EVIL_WHALE, "walk");
        anim.frame_index = 3;
        play_state(&mut anim, "cry", &store);
        assert_eq!(anim.clip_key, "cry-Evil Whale");
        assert_eq!(anim.frame_index, 0);
    }
}
