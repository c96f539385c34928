//! Behavior scheduler.
//!
//! Every creature runs a small state machine: it walks to a random spot or
//! stands around playing an idle state, and re-rolls when its timer runs out.
//! What a re-roll may pick depends on the creature's [`VisualKind`] and is
//! delegated to a [`BehaviorPolicy`]:
//!
//! - [`RegularPolicy`]: even odds of walking somewhere or idling in any state
//!   that is not a transit state.
//! - [`BossPolicy`]: one of `emerge`, `walk` or `attack`; only `walk` moves.
//!
//! While a boss is on screen every regular creature pursues it instead: its
//! target follows the boss every frame and its own timer is ignored.
//!
//! Creatures that are dragged, tweened, defeated or in a scripted flourish
//! are left alone.

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, is_transit_state};
use crate::components::behavior::Behavior;
use crate::components::creature::{BossState, Creature, VisualKind};
use crate::components::drag::Draggable;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::tween::TweenPosition;
use crate::resources::animationstore::AnimationStore;
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::SceneRng;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::play_state;

/// Seconds between re-rolls, drawn uniformly from this range.
pub const REROLL_INTERVAL: (f32, f32) = (2.0, 6.0);
/// Units per tick when wandering.
pub const WALK_SPEED: (f32, f32) = (1.0, 3.0);
/// Units per tick when chasing the boss.
pub const PURSUIT_SPEED: (f32, f32) = (3.0, 5.0);
/// Probability that a regular re-roll walks instead of idling.
pub const WALK_CHANCE: f32 = 0.5;

const BOSS_CHOICES: [&str; 3] = ["emerge", "walk", "attack"];
const BOSS_IDLE: [&str; 2] = ["emerge", "attack"];
const DEFAULT_IDLE: &str = "stand";

/// Outcome of a re-roll.
#[derive(Debug, Clone, PartialEq)]
pub enum Reroll {
    Walk { target_x: f32, speed: f32 },
    Idle { state: String },
}

/// What a policy needs to know about the creature being re-rolled.
#[derive(Debug, Clone, Copy)]
pub struct RerollContext<'a> {
    /// Display width of the sprite; also the margin kept from the edges.
    pub display_w: f32,
    pub viewport_w: f32,
    /// States of the creature's sheet, in catalog order.
    pub states: &'a [String],
}

impl RerollContext<'_> {
    fn random_target(&self, rng: &mut SceneRng) -> f32 {
        let margin = self.display_w;
        let hi = self.viewport_w - margin;
        if hi <= margin {
            self.viewport_w * 0.5
        } else {
            rng.range(margin, hi)
        }
    }
}

/// Behavior selection rules of one kind of creature.
pub trait BehaviorPolicy: Sync {
    /// Pick the next behavior.
    fn reroll(&self, ctx: &RerollContext, rng: &mut SceneRng) -> Reroll;

    /// Pick the state to play after arriving somewhere.
    fn idle_state(&self, states: &[String], rng: &mut SceneRng) -> String;
}

pub struct RegularPolicy;

impl BehaviorPolicy for RegularPolicy {
    fn reroll(&self, ctx: &RerollContext, rng: &mut SceneRng) -> Reroll {
        if rng.chance(WALK_CHANCE) {
            Reroll::Walk {
                target_x: ctx.random_target(rng),
                speed: rng.range(WALK_SPEED.0, WALK_SPEED.1),
            }
        } else {
            Reroll::Idle {
                state: self.idle_state(ctx.states, rng),
            }
        }
    }

    fn idle_state(&self, states: &[String], rng: &mut SceneRng) -> String {
        let idle: Vec<&String> = states.iter().filter(|s| !is_transit_state(s)).collect();
        rng.pick(&idle)
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_IDLE.to_owned())
    }
}

pub struct BossPolicy;

impl BehaviorPolicy for BossPolicy {
    fn reroll(&self, ctx: &RerollContext, rng: &mut SceneRng) -> Reroll {
        match rng.pick(&BOSS_CHOICES).copied() {
            Some("walk") => Reroll::Walk {
                target_x: ctx.random_target(rng),
                speed: rng.range(WALK_SPEED.0, WALK_SPEED.1),
            },
            Some(state) => Reroll::Idle {
                state: state.to_owned(),
            },
            None => Reroll::Idle {
                state: BOSS_IDLE[0].to_owned(),
            },
        }
    }

    fn idle_state(&self, _states: &[String], rng: &mut SceneRng) -> String {
        rng.pick(&BOSS_IDLE).copied().unwrap_or(BOSS_IDLE[0]).to_owned()
    }
}

pub fn policy_for(kind: VisualKind) -> &'static dyn BehaviorPolicy {
    match kind {
        VisualKind::Regular => &RegularPolicy,
        VisualKind::Boss => &BossPolicy,
    }
}

/// Apply a re-roll outcome: mode, speed, facing, animation and a fresh timer.
pub fn apply_reroll(
    reroll: Reroll,
    x: f32,
    behavior: &mut Behavior,
    anim: &mut Animation,
    store: &AnimationStore,
    rng: &mut SceneRng,
) {
    match reroll {
        Reroll::Walk { target_x, speed } => {
            behavior.walk_to(x, target_x);
            behavior.move_speed = speed;
            behavior.timer = rng.range(REROLL_INTERVAL.0, REROLL_INTERVAL.1);
            play_state(anim, "walk", store);
        }
        Reroll::Idle { state } => {
            behavior.rest(rng.range(REROLL_INTERVAL.0, REROLL_INTERVAL.1));
            play_state(anim, &state, store);
        }
    }
    behavior.fresh = true;
}

/// Re-roll `behavior` right away with the policy of `kind`.
#[allow(clippy::too_many_arguments)]
pub fn reroll_now(
    kind: VisualKind,
    x: f32,
    display_w: f32,
    viewport: &Viewport,
    behavior: &mut Behavior,
    anim: &mut Animation,
    store: &AnimationStore,
    rng: &mut SceneRng,
) {
    let states = store
        .sheet(&anim.sheet)
        .map(|info| info.states.as_slice())
        .unwrap_or_default();
    let ctx = RerollContext {
        display_w,
        viewport_w: viewport.w,
        states,
    };
    let reroll = policy_for(kind).reroll(&ctx, rng);
    log::debug!("Re-roll on '{}': {:?}", anim.sheet, reroll);
    apply_reroll(reroll, x, behavior, anim, store, rng);
}

/// Whether the scheduler, movement and detector must leave this creature be.
pub fn is_suspended(drag: Option<&Draggable>, boss: Option<&BossState>) -> bool {
    drag.is_some_and(Draggable::is_dragging)
        || boss.is_some_and(|b| b.defeated || b.scripted)
}

/// Advance every creature's behavior state machine by one tick.
#[allow(clippy::type_complexity)]
pub fn behavior_scheduler(
    time: Res<WorldTime>,
    registry: Res<EntityRegistry>,
    viewport: Res<Viewport>,
    store: Res<AnimationStore>,
    mut rng: ResMut<SceneRng>,
    positions: Query<&MapPosition>,
    mut query: Query<
        (
            &Creature,
            &MapPosition,
            &Sprite,
            &mut Behavior,
            &mut Animation,
            Option<&Draggable>,
            Option<&BossState>,
        ),
        Without<TweenPosition>,
    >,
) {
    let boss_x = registry
        .boss()
        .and_then(|boss| positions.get(boss).ok())
        .map(|p| p.pos.x);

    for (creature, position, sprite, mut behavior, mut anim, drag, boss) in query.iter_mut() {
        if is_suspended(drag, boss) {
            continue;
        }
        let x = position.pos.x;

        if let (Some(target_x), false) = (boss_x, creature.is_boss()) {
            if !behavior.pursuing {
                behavior.pursuing = true;
                behavior.move_speed = rng.range(PURSUIT_SPEED.0, PURSUIT_SPEED.1);
                log::debug!("'{}' starts chasing the boss", creature.name);
            }
            behavior.walk_to(x, target_x);
            play_state(&mut anim, "walk", &store);
            continue;
        }

        if behavior.pursuing {
            behavior.pursuing = false;
            behavior.expire();
        }

        behavior.timer -= time.delta;
        if behavior.timer <= 0.0 {
            reroll_now(
                creature.kind,
                x,
                sprite.width,
                &viewport,
                &mut behavior,
                &mut anim,
                &store,
                &mut rng,
            );
            continue;
        }

        if let Some(target_x) = behavior.move_target()
            && (target_x - x).abs() <= behavior.move_speed
        {
            let states = store
                .sheet(&anim.sheet)
                .map(|info| info.states.as_slice())
                .unwrap_or_default();
            let state = policy_for(creature.kind).idle_state(states, &mut rng);
            behavior.rest(rng.range(REROLL_INTERVAL.0, REROLL_INTERVAL.1));
            play_state(&mut anim, &state, &store);
        }
    }
}
