//! Position tween system and its completion observer.
//!
//! [`tween_mapposition_system`] interpolates [`MapPosition`] along every
//! [`TweenPosition`]. A finished tween snaps to its destination, is removed,
//! and a [`TweenFinishedEvent`] is triggered carrying its follow-up, which
//! [`on_tween_finished`] applies:
//!
//! - `Resume`: nothing; the scheduler picks the entity up again.
//! - `Reroll`: the entity re-rolls its behavior on the next scheduler tick.
//! - `Landed`: a launched creature starts falling back to the ground.
//! - `Grounded`: the creature is back on its feet and walks again.

use bevy_ecs::prelude::*;
use raylib::math::Vector2;

use crate::components::animation::Animation;
use crate::components::behavior::Behavior;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::tween::{Easing, TweenFinish, TweenPosition};
use crate::events::tween::TweenFinishedEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::play_state;

/// Duration of the bounce from the landing point down to the ground.
pub const GROUNDING_DURATION: f32 = 0.8;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::BounceOut => bounce_out(t),
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Linearly interpolate between two 2D vectors.
pub(crate) fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Animate entity positions based on [`TweenPosition`] components.
pub fn tween_mapposition_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut MapPosition, &mut TweenPosition)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut mp, mut tw) in query.iter_mut() {
        tw.time = (tw.time + dt).min(tw.duration);
        if tw.finished() {
            mp.pos = tw.to;
            commands.entity(entity).try_remove::<TweenPosition>();
            commands.trigger(TweenFinishedEvent {
                entity,
                action: tw.on_finish,
            });
            continue;
        }
        let t = ease(tw.easing, tw.time / tw.duration);
        mp.pos = lerp_v2(tw.from, tw.to, t);
    }
}

/// Observer for [`TweenFinishedEvent`]. Stale entities are ignored.
pub fn on_tween_finished(
    trigger: On<TweenFinishedEvent>,
    mut query: Query<(&MapPosition, &Sprite, &mut Animation, &mut Behavior)>,
    store: Res<AnimationStore>,
    viewport: Res<Viewport>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((position, sprite, mut anim, mut behavior)) = query.get_mut(event.entity) else {
        return;
    };

    match event.action {
        TweenFinish::Resume => {}
        TweenFinish::Reroll => behavior.expire(),
        TweenFinish::Landed => {
            play_state(&mut anim, "fall", &store);
            let ground = Vector2::new(position.pos.x, viewport.ground_y(sprite.height));
            commands.entity(event.entity).try_insert(
                TweenPosition::new(position.pos, ground, GROUNDING_DURATION)
                    .with_easing(Easing::BounceOut)
                    .then(TweenFinish::Grounded),
            );
        }
        TweenFinish::Grounded => play_state(&mut anim, "walk", &store),
    }
}
