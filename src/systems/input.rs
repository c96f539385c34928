//! Pointer interaction: click versus drag.
//!
//! [`on_pointer`] runs the press/move/release cycle of one creature:
//!
//! - Press records time and position.
//! - Moving at least [`MOVE_THRESHOLD`] px away from the press starts a drag:
//!   the creature plays `drag`, any tween is cancelled and it follows the
//!   pointer exactly.
//! - Releasing a drag drops the creature back to the ground with a bounce and
//!   re-rolls its behavior when it lands.
//! - Releasing a press shorter than [`CLICK_THRESHOLD`] is a click: the
//!   creature cycles to its next non-transit state and stays put.
//!
//! The windowed host feeds the observer from raylib in [`poll_pointer`];
//! headless hosts trigger [`PointerEvent`]s directly.

use bevy_ecs::prelude::*;
use raylib::prelude::{KeyboardKey, MouseButton, RaylibHandle, Vector2};

use crate::components::animation::{Animation, is_transit_state};
use crate::components::behavior::Behavior;
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{BossState, Creature};
use crate::components::drag::{CLICK_THRESHOLD, DragState, Draggable, MOVE_THRESHOLD};
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::tween::{Easing, TweenFinish, TweenPosition};
use crate::components::zindex::ZIndex;
use crate::events::input::{PointerEvent, PointerKind};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::PointerCapture;
use crate::resources::rng::SceneRng;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::play_state;
use crate::systems::behavior::REROLL_INTERVAL;

/// Duration of the fall back to the ground after a drag.
pub const DROP_DURATION: f32 = 0.5;

/// State following `current` in the click cycle of `states`.
///
/// Transit states are not part of the cycle; from one of them (or any state
/// outside the cycle) the cycle starts over at its first state.
pub fn next_click_state(states: &[String], current: &str) -> Option<String> {
    let cycle: Vec<&String> = states.iter().filter(|s| !is_transit_state(s)).collect();
    if cycle.is_empty() {
        return None;
    }
    let next = match cycle.iter().position(|s| *s == current) {
        Some(i) => (i + 1) % cycle.len(),
        None => 0,
    };
    Some(cycle[next].clone())
}

/// Topmost creature whose collider contains `point`.
pub fn pick_topmost<'a>(
    point: Vector2,
    candidates: impl Iterator<Item = (Entity, &'a MapPosition, &'a BoxCollider, &'a ZIndex)>,
) -> Option<Entity> {
    candidates
        .filter(|(_, pos, collider, _)| collider.contains_point(pos.pos, point))
        .max_by_key(|(_, _, _, z)| **z)
        .map(|(entity, _, _, _)| entity)
}

/// Observer for [`PointerEvent`]. Events for missing entities are ignored.
#[allow(clippy::type_complexity)]
pub fn on_pointer(
    trigger: On<PointerEvent>,
    mut query: Query<(
        &mut Draggable,
        &mut MapPosition,
        &mut Animation,
        &mut Behavior,
        &Sprite,
        Option<&BossState>,
    )>,
    store: Res<AnimationStore>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SceneRng>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok((mut drag, mut position, mut anim, mut behavior, sprite, boss)) =
        query.get_mut(event.entity)
    else {
        return;
    };
    if boss.is_some_and(|b| b.defeated) {
        drag.reset();
        return;
    }

    match (event.kind, drag.state) {
        (PointerKind::Press, _) => {
            drag.state = DragState::Pressed {
                time: event.time,
                start: event.pos,
            };
        }
        (PointerKind::Move, DragState::Pressed { start, .. }) => {
            if start.distance_to(event.pos) >= MOVE_THRESHOLD {
                drag.state = DragState::Dragging;
                commands.entity(event.entity).try_remove::<TweenPosition>();
                play_state(&mut anim, "drag", &store);
                position.pos = event.pos;
            }
        }
        (PointerKind::Move, DragState::Dragging) => {
            position.pos = event.pos;
        }
        (PointerKind::Release, DragState::Dragging) => {
            play_state(&mut anim, "fall", &store);
            let ground = Vector2::new(
                viewport.clamp_x(position.pos.x, sprite.width * 0.5),
                viewport.ground_y(sprite.height),
            );
            commands.entity(event.entity).try_insert(
                TweenPosition::new(position.pos, ground, DROP_DURATION)
                    .with_easing(Easing::BounceOut)
                    .then(TweenFinish::Reroll),
            );
            drag.reset();
        }
        (PointerKind::Release, DragState::Pressed { time, .. }) => {
            if event.time - time < CLICK_THRESHOLD {
                let states = store
                    .sheet(&anim.sheet)
                    .map(|info| info.states.as_slice())
                    .unwrap_or_default();
                if let Some(next) = next_click_state(states, &anim.state) {
                    log::debug!("Click cycles '{}' -> '{}'", anim.state, next);
                    play_state(&mut anim, &next, &store);
                    behavior.rest(rng.range(REROLL_INTERVAL.0, REROLL_INTERVAL.1));
                }
            }
            drag.reset();
        }
        (PointerKind::Move | PointerKind::Release, DragState::Idle) => {}
    }
}

/// Turn raylib mouse input into [`PointerEvent`]s for the captured creature.
#[allow(clippy::type_complexity)]
pub fn poll_pointer(
    rl: NonSend<RaylibHandle>,
    time: Res<WorldTime>,
    mut capture: ResMut<PointerCapture>,
    hits: Query<(Entity, &MapPosition, &BoxCollider, &ZIndex), With<Creature>>,
    mut commands: Commands,
) {
    let pos = rl.get_mouse_position();
    let now = time.elapsed;

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some(entity) = pick_topmost(pos, hits.iter()) {
            capture.capture(entity);
            commands.trigger(PointerEvent {
                entity,
                kind: PointerKind::Press,
                pos,
                time: now,
            });
        }
        return;
    }

    let Some(entity) = capture.entity else {
        return;
    };
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        capture.release();
        commands.trigger(PointerEvent {
            entity,
            kind: PointerKind::Release,
            pos,
            time: now,
        });
    } else if rl.get_mouse_delta() != Vector2::zero() {
        commands.trigger(PointerEvent {
            entity,
            kind: PointerKind::Move,
            pos,
            time: now,
        });
    }
}

/// F11 toggles debug drawing.
pub fn poll_debug_key(rl: NonSend<RaylibHandle>, mut commands: Commands) {
    if rl.is_key_pressed(KeyboardKey::KEY_F11) {
        commands.trigger(SwitchDebugEvent {});
    }
}
