//! Collision resolver.
//!
//! [`resolve_collision`] observes [`CollisionEvent`] and decides what a
//! collision does:
//!
//! - Two regular creatures are pushed 50 units apart over 0.3 s. Nothing
//!   else changes.
//! - A collision involving the boss increments its collision count, then:
//!   - at 50 the boss cries, is defeated and leaves two seconds later;
//!   - on every fifth collision below that it plays its escalation
//!     flourish (`cry`, then `attack`, then a fresh behavior);
//!   - in every non-defeat case both are launched away from each other and
//!     the creature falls back down and walks again afterwards.
//!
//! Launch targets are clamped so everything lands inside the viewport.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::creature::{BossState, Creature};
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::timer::{Timer, TimerAction};
use crate::components::tween::{Easing, TweenFinish, TweenPosition};
use crate::events::collision::CollisionEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::rng::SceneRng;
use crate::resources::viewport::Viewport;
use crate::systems::animation::play_state;

/// Horizontal distance each creature is pushed on a creature collision.
pub const PUSH_DISTANCE: f32 = 50.0;
pub const PUSH_DURATION: f32 = 0.3;

/// Collisions after which the boss is defeated.
pub const DEFEAT_COUNT: u32 = 50;
/// The flourish plays on every multiple of this count.
pub const FLOURISH_EVERY: u32 = 5;
/// Delay between the flourish's `cry` and `attack` beats.
pub const FLOURISH_ATTACK_DELAY: f32 = 0.6;
/// Delay between defeat and removal of the boss.
pub const REMOVAL_DELAY: f32 = 2.0;

/// Launch force all launch displacements are scaled from.
pub const BASE_FORCE: f32 = 150.0;
pub const BOSS_LAUNCH_DURATION: f32 = 0.8;
pub const CREATURE_LAUNCH_DURATION: f32 = 1.0;

/// What a boss collision with the given resulting count leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossOutcome {
    Defeat,
    Flourish,
    Bounce,
}

pub fn boss_outcome(collision_count: u32) -> BossOutcome {
    if collision_count >= DEFEAT_COUNT {
        BossOutcome::Defeat
    } else if collision_count % FLOURISH_EVERY == 0 {
        BossOutcome::Flourish
    } else {
        BossOutcome::Bounce
    }
}

/// Where a launched boss and creature land.
///
/// `angle` points from the boss to the creature. The boss recoils a little
/// against it; the creature flies along it, biased sideways by `bias` and
/// thrown upward.
pub fn launch_targets(boss: Vector2, creature: Vector2, bias: f32) -> (Vector2, f32, Vector2) {
    let angle = (creature.y - boss.y).atan2(creature.x - boss.x);
    let (sin, cos) = angle.sin_cos();
    let recoil = BASE_FORCE * 0.3;
    let thrust = BASE_FORCE * 1.5;
    let boss_to = Vector2::new(boss.x - cos * recoil, boss.y - sin * recoil);
    let creature_to = Vector2::new(
        creature.x + cos * thrust + bias,
        creature.y + sin * thrust - BASE_FORCE,
    );
    (boss_to, angle, creature_to)
}

fn clamp_boss(to: Vector2, sprite: &Sprite, viewport: &Viewport) -> Vector2 {
    let ground = viewport.ground_y(sprite.height);
    Vector2::new(
        viewport.clamp_x(to.x, sprite.width * 0.5),
        to.y.clamp(ground - viewport.h * 0.1, ground),
    )
}

fn clamp_creature(to: Vector2, sprite: &Sprite, viewport: &Viewport) -> Vector2 {
    let ground = viewport.ground_y(sprite.height);
    let ceiling = (viewport.h * 0.3).min(ground);
    Vector2::new(
        viewport.clamp_x(to.x, sprite.width * 0.5),
        to.y.clamp(ceiling, ground),
    )
}

/// Observer for [`CollisionEvent`]. Stale entities are ignored.
#[allow(clippy::type_complexity)]
pub fn resolve_collision(
    trigger: On<CollisionEvent>,
    mut query: Query<(
        &Creature,
        &MapPosition,
        &Sprite,
        &mut Animation,
        Option<&mut BossState>,
    )>,
    store: Res<AnimationStore>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SceneRng>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok([a, b]) = query.get_many_mut([event.a, event.b]) else {
        return;
    };
    let (ea, eb) = (event.a, event.b);

    let (boss, other, boss_entity, other_entity) = match (a.0.is_boss(), b.0.is_boss()) {
        (true, _) => (a, b, ea, eb),
        (false, true) => (b, a, eb, ea),
        (false, false) => {
            push_apart((ea, a.1.pos, a.2), (eb, b.1.pos, b.2), &viewport, &mut commands);
            return;
        }
    };

    let (boss_creature, boss_pos, boss_sprite, mut boss_anim, boss_state) = boss;
    let Some(mut state) = boss_state else {
        return;
    };
    if state.defeated {
        return;
    }
    state.collision_count += 1;
    let outcome = boss_outcome(state.collision_count);
    log::debug!(
        "Boss '{}' hit by '{}' ({} / {DEFEAT_COUNT}): {outcome:?}",
        boss_creature.name,
        other.0.name,
        state.collision_count
    );

    match outcome {
        BossOutcome::Defeat => {
            state.defeated = true;
            state.scripted = false;
            play_state(&mut boss_anim, "cry", &store);
            log::info!("Boss '{}' defeated", boss_creature.name);
            commands
                .entity(boss_entity)
                .try_insert(Timer::new(REMOVAL_DELAY, TimerAction::RemoveBoss));
            return;
        }
        BossOutcome::Flourish => {
            state.scripted = true;
            play_state(&mut boss_anim, "cry", &store);
            commands
                .entity(boss_entity)
                .try_insert(Timer::new(FLOURISH_ATTACK_DELAY, TimerAction::BossAttack));
        }
        BossOutcome::Bounce => {}
    }

    let (_, other_pos, other_sprite, mut other_anim, _) = other;
    let bias = rng.range(-0.5 * BASE_FORCE, 0.5 * BASE_FORCE);
    let (boss_to, _angle, creature_to) = launch_targets(boss_pos.pos, other_pos.pos, bias);

    commands.entity(boss_entity).try_insert(
        TweenPosition::new(
            boss_pos.pos,
            clamp_boss(boss_to, boss_sprite, &viewport),
            BOSS_LAUNCH_DURATION,
        )
        .with_easing(Easing::QuadOut),
    );

    play_state(&mut other_anim, "drop", &store);
    commands.entity(other_entity).try_insert(
        TweenPosition::new(
            other_pos.pos,
            clamp_creature(creature_to, other_sprite, &viewport),
            CREATURE_LAUNCH_DURATION,
        )
        .with_easing(Easing::QuadOut)
        .then(TweenFinish::Landed),
    );
}

fn push_apart(
    a: (Entity, Vector2, &Sprite),
    b: (Entity, Vector2, &Sprite),
    viewport: &Viewport,
    commands: &mut Commands,
) {
    let (left, right) = if a.1.x <= b.1.x { (a, b) } else { (b, a) };
    for ((entity, pos, sprite), dx) in [(left, -PUSH_DISTANCE), (right, PUSH_DISTANCE)] {
        let to = Vector2::new(viewport.clamp_x(pos.x + dx, sprite.width * 0.5), pos.y);
        commands.entity(entity).try_insert(
            TweenPosition::new(pos, to, PUSH_DURATION).with_easing(Easing::QuadOut),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_outcome_flourish_only_on_multiples_of_five() {
        for count in 1..DEFEAT_COUNT {
            let expected = if count % 5 == 0 {
                BossOutcome::Flourish
            } else {
                BossOutcome::Bounce
            };
            assert_eq!(boss_outcome(count), expected, "count {count}");
        }
    }

    #[test]
    fn test_outcome_defeat_at_fifty() {
        assert_eq!(boss_outcome(49), BossOutcome::Bounce);
        assert_eq!(boss_outcome(50), BossOutcome::Defeat);
        assert_eq!(boss_outcome(51), BossOutcome::Defeat);
    }

    #[test]
    fn test_launch_creature_to_the_right() {
        let (boss_to, angle, creature_to) =
            launch_targets(Vector2::new(100.0, 100.0), Vector2::new(200.0, 100.0), 0.0);
        assert!(approx_eq(angle, 0.0));
        assert!(approx_eq(boss_to.x, 55.0));
        assert!(approx_eq(boss_to.y, 100.0));
        assert!(approx_eq(creature_to.x, 425.0));
        assert!(approx_eq(creature_to.y, -50.0));
    }

    #[test]
    fn test_launch_bias_shifts_creature_only() {
        let (boss_a, _, creature_a) =
            launch_targets(Vector2::new(0.0, 0.0), Vector2::new(-10.0, 0.0), 0.0);
        let (boss_b, _, creature_b) =
            launch_targets(Vector2::new(0.0, 0.0), Vector2::new(-10.0, 0.0), 30.0);
        assert!(approx_eq(boss_a.x, boss_b.x));
        assert!(approx_eq(creature_b.x - creature_a.x, 30.0));
        assert!(boss_a.x > 0.0);
    }

    #[test]
    fn test_clamps_keep_landing_inside() {
        let viewport = Viewport::new(800.0, 200.0);
        let dolphin = Sprite::new("Sword Dolphin", 128.0, 1.0);
        let whale = Sprite::new("Evil Whale", 128.0, 1.5);

        let c = clamp_creature(Vector2::new(900.0, -50.0), &dolphin, &viewport);
        assert_eq!((c.x, c.y), (736.0, 60.0));
        let c = clamp_creature(Vector2::new(400.0, 500.0), &dolphin, &viewport);
        assert_eq!(c.y, 136.0);

        let b = clamp_boss(Vector2::new(-30.0, 0.0), &whale, &viewport);
        assert_eq!((b.x, b.y), (96.0, 84.0));
    }
}
