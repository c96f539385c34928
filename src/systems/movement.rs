use bevy_ecs::prelude::*;

use crate::components::behavior::Behavior;
use crate::components::creature::BossState;
use crate::components::drag::Draggable;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::tween::TweenPosition;
use crate::systems::behavior::is_suspended;

/// Step moving creatures toward their target and keep sprites facing the way
/// they walk.
///
/// Motion is per tick, not per second: `move_speed` units each frame while
/// the target is further than one step away. A creature re-rolled this tick
/// waits until the next one.
pub fn movement(
    mut query: Query<
        (
            &mut MapPosition,
            &mut Behavior,
            &mut Sprite,
            Option<&Draggable>,
            Option<&BossState>,
        ),
        Without<TweenPosition>,
    >,
) {
    for (mut position, mut behavior, mut sprite, drag, boss) in query.iter_mut() {
        if is_suspended(drag, boss) {
            continue;
        }
        sprite.flip_h = behavior.faces_left();
        if behavior.fresh {
            behavior.fresh = false;
            continue;
        }
        if let Some(target_x) = behavior.move_target()
            && (target_x - position.pos.x).abs() > behavior.move_speed
        {
            position.pos.x += behavior.move_speed * behavior.direction;
        }
    }
}
