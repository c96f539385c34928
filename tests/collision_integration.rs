//! Collision integration tests: cooldown, push-apart, boss escalation,
//! bounce trajectories and boss removal, driven through a headless host.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use ranchscene::components::animation::Animation;
use ranchscene::components::behavior::Behavior;
use ranchscene::components::creature::{BossState, CreatureSpec};
use ranchscene::components::mapposition::MapPosition;
use ranchscene::components::overlay::Overlay;
use ranchscene::components::timer::{Timer, TimerAction};
use ranchscene::components::tween::{TweenFinish, TweenPosition};
use ranchscene::events::collision::CollisionEvent;
use ranchscene::host::SceneHost;
use ranchscene::resources::catalog::{EVIL_WHALE, SWORD_DOLPHIN, SpriteCatalog};
use ranchscene::resources::gameconfig::SceneConfig;
use ranchscene::resources::outbox::SceneNotice;
use ranchscene::resources::rng::{SceneRng, ScriptedRandom};

const EPSILON: f32 = 1e-3;

/// Ground y of a 128 px dolphin in a 200 px tall viewport.
const DOLPHIN_GROUND: f32 = 136.0;
/// Ground y of the whale, drawn at 1.5x.
const WHALE_GROUND: f32 = 104.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Collisions(Vec<(Entity, Entity)>);

/// Headless host with loaded sheets and a collision recorder.
///
/// Every random draw returns `sample`: at 0.9 no trigger roll ever succeeds
/// and regular creatures idle; at 0.0 every roll succeeds and they walk.
fn make_host(sample: f32) -> SceneHost {
    let mut config = SceneConfig::new();
    config.viewport_width = 1000;
    config.viewport_height = 200;
    let mut host = SceneHost::new_headless(
        config,
        SpriteCatalog::builtin(),
        SceneRng::new(ScriptedRandom::constant(sample)),
    );
    host.preload_sheet(SWORD_DOLPHIN, 1280).unwrap();
    host.preload_sheet(EVIL_WHALE, 512).unwrap();

    let world = host.world_mut();
    world.init_resource::<Collisions>();
    world.add_observer(|t: On<CollisionEvent>, mut hits: ResMut<Collisions>| {
        hits.0.push((t.event().a, t.event().b));
    });
    world.flush();
    host
}

fn collide(host: &mut SceneHost, a: Entity, b: Entity) {
    let world = host.world_mut();
    world.trigger(CollisionEvent { a, b });
    world.flush();
}

fn place(host: &mut SceneHost, e: Entity, x: f32, y: f32) {
    host.world_mut().get_mut::<MapPosition>(e).unwrap().pos = Vector2::new(x, y);
}

fn state(host: &SceneHost, e: Entity) -> String {
    host.world().get::<Animation>(e).unwrap().state.clone()
}

fn hits(host: &SceneHost) -> usize {
    host.world().resource::<Collisions>().0.len()
}

fn boss_state(host: &SceneHost, e: Entity) -> BossState {
    host.world().get::<BossState>(e).unwrap().clone()
}

/// Spawn a whale and one dolphin and wait for the whale's entrance to end.
fn boss_scene(sample: f32) -> (SceneHost, Entity, Entity) {
    let mut host = make_host(sample);
    host.set_desired_entities(&[
        CreatureSpec::boss("whale", EVIL_WHALE),
        CreatureSpec::regular("flipper", SWORD_DOLPHIN),
    ]);
    for _ in 0..12 {
        host.tick(0.1);
    }
    let boss = host.entity("whale").unwrap();
    let dolphin = host.entity("flipper").unwrap();
    assert!(host.world().get::<TweenPosition>(boss).is_none());
    (host, boss, dolphin)
}

#[test]
fn test_pair_cooldown_blocks_repeat_collisions() {
    // Both dolphins spawn at the left edge, overlapping.
    let mut host = make_host(0.0);
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
    ]);

    host.tick(0.1);
    assert_eq!(hits(&host), 1);

    // Still overlapping, but the pair is cooling down for 2 s.
    for _ in 0..18 {
        host.tick(0.1);
    }
    assert_eq!(hits(&host), 1);

    for _ in 0..10 {
        host.tick(0.1);
    }
    assert!(hits(&host) >= 2);
}

#[test]
fn test_creatures_push_apart() {
    let mut host = make_host(0.9);
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
    ]);
    let a = host.entity("a").unwrap();
    let b = host.entity("b").unwrap();
    place(&mut host, a, 340.0, DOLPHIN_GROUND);
    place(&mut host, b, 300.0, DOLPHIN_GROUND);
    let (state_a, state_b) = (state(&host, a), state(&host, b));

    collide(&mut host, a, b);
    for _ in 0..5 {
        host.tick(0.1);
    }

    // b started on the left and moves left, a started on the right and moves right.
    let pa = host.world().get::<MapPosition>(a).unwrap().pos;
    let pb = host.world().get::<MapPosition>(b).unwrap().pos;
    assert!(approx_eq(pa.x, 390.0));
    assert!(approx_eq(pb.x, 250.0));
    assert!(approx_eq(pa.y, DOLPHIN_GROUND) && approx_eq(pb.y, DOLPHIN_GROUND));
    assert_eq!(state(&host, a), state_a);
    assert_eq!(state(&host, b), state_b);
}

#[test]
fn test_push_apart_stays_inside_viewport() {
    let mut host = make_host(0.9);
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
    ]);
    let a = host.entity("a").unwrap();
    let b = host.entity("b").unwrap();
    place(&mut host, a, 80.0, DOLPHIN_GROUND);
    place(&mut host, b, 120.0, DOLPHIN_GROUND);

    collide(&mut host, a, b);
    for _ in 0..5 {
        host.tick(0.1);
    }
    assert!(approx_eq(host.world().get::<MapPosition>(a).unwrap().pos.x, 64.0));
}

#[test]
fn test_boss_bounce_scenario() {
    let (mut host, boss, dolphin) = boss_scene(0.9);
    place(&mut host, boss, 500.0, WHALE_GROUND);
    place(&mut host, dolphin, 560.0, DOLPHIN_GROUND);

    collide(&mut host, boss, dolphin);

    assert_eq!(boss_state(&host, boss).collision_count, 1);
    assert_eq!(state(&host, dolphin), "drop");

    let boss_tween = host.world().get::<TweenPosition>(boss).unwrap().clone();
    assert!(boss_tween.to.y >= WHALE_GROUND - 20.0 - EPSILON);
    assert!(boss_tween.to.y <= WHALE_GROUND + EPSILON);
    assert!(boss_tween.to.x < 500.0);
    assert!(approx_eq(boss_tween.duration, 0.8));

    let launch = host.world().get::<TweenPosition>(dolphin).unwrap().clone();
    assert!(launch.to.y >= 60.0 - EPSILON && launch.to.y <= DOLPHIN_GROUND + EPSILON);
    assert!(launch.to.x >= 64.0 && launch.to.x <= 936.0);
    assert!(launch.to.x > 560.0);
    assert!(approx_eq(launch.duration, 1.0));
    assert_eq!(launch.on_finish, TweenFinish::Landed);

    // Landing: fall, then a grounding bounce.
    let mut landed = false;
    for _ in 0..20 {
        host.tick(0.1);
        if state(&host, dolphin) == "fall" {
            landed = true;
            break;
        }
    }
    assert!(landed);
    let grounding = host.world().get::<TweenPosition>(dolphin).unwrap().clone();
    assert_eq!(grounding.on_finish, TweenFinish::Grounded);
    assert!(approx_eq(grounding.to.y, DOLPHIN_GROUND));

    // Grounded: walk again, back under the scheduler.
    let mut grounded = false;
    for _ in 0..20 {
        host.tick(0.1);
        if state(&host, dolphin) == "walk" {
            grounded = true;
            break;
        }
    }
    assert!(grounded);
    assert!(host.world().get::<TweenPosition>(dolphin).is_none());
    assert!(approx_eq(
        host.world().get::<MapPosition>(dolphin).unwrap().pos.y,
        DOLPHIN_GROUND
    ));
    assert_eq!(boss_state(&host, boss).collision_count, 1);
}

#[test]
fn test_flourish_exactly_on_multiples_of_five() {
    let (mut host, boss, dolphin) = boss_scene(0.9);

    for count in 1..50u32 {
        collide(&mut host, boss, dolphin);
        assert_eq!(boss_state(&host, boss).collision_count, count);

        let timer = host.world().get::<Timer>(boss).map(|t| t.action);
        if count % 5 == 0 {
            assert_eq!(timer, Some(TimerAction::BossAttack), "count {count}");
            assert_eq!(state(&host, boss), "cry");
            assert!(boss_state(&host, boss).scripted);
        } else {
            assert_eq!(timer, None, "count {count}");
        }

        let world = host.world_mut();
        world.entity_mut(boss).remove::<Timer>();
        world.get_mut::<BossState>(boss).unwrap().scripted = false;
    }
    assert!(!boss_state(&host, boss).defeated);
}

#[test]
fn test_flourish_sequence() {
    let (mut host, boss, dolphin) = boss_scene(0.9);
    for _ in 0..5 {
        collide(&mut host, boss, dolphin);
    }
    assert_eq!(state(&host, boss), "cry");

    // cry, then attack 0.6 s later
    for _ in 0..3 {
        host.tick(0.25);
    }
    assert_eq!(state(&host, boss), "attack");
    assert!(boss_state(&host, boss).scripted);

    // then a re-roll 2 s later
    for _ in 0..9 {
        host.tick(0.25);
    }
    assert!(!boss_state(&host, boss).scripted);
    assert_eq!(boss_state(&host, boss).collision_count, 5);
}

#[test]
fn test_boss_removed_exactly_at_fifty() {
    let (mut host, boss, dolphin) = boss_scene(0.9);

    for _ in 0..49 {
        collide(&mut host, boss, dolphin);
    }
    let before = boss_state(&host, boss);
    assert_eq!(before.collision_count, 49);
    assert!(!before.defeated);

    collide(&mut host, boss, dolphin);
    let after = boss_state(&host, boss);
    assert_eq!(after.collision_count, 50);
    assert!(after.defeated);
    assert_eq!(state(&host, boss), "cry");
    assert_eq!(
        host.world().get::<Timer>(boss).map(|t| t.action),
        Some(TimerAction::RemoveBoss)
    );

    // A defeated boss takes no further hits.
    collide(&mut host, boss, dolphin);
    assert_eq!(boss_state(&host, boss).collision_count, 50);

    for _ in 0..30 {
        host.tick(0.1);
        if host.entity("whale").is_none() {
            break;
        }
    }
    assert!(host.entity("whale").is_none());
    assert!(host.world().get_entity(boss).is_err());

    assert_eq!(
        host.drain_notices(),
        vec![
            SceneNotice::BossRemoved,
            SceneNotice::RewardGranted { amount: 50 }
        ]
    );

    // Pursuit is over: the dolphin follows its own timer again.
    host.tick(0.1);
    let behavior = host.world().get::<Behavior>(dolphin).unwrap().clone();
    assert!(!behavior.pursuing);

    for _ in 0..10 {
        host.tick(0.1);
    }
    assert!(host.drain_notices().is_empty());
    let world = host.world_mut();
    assert_eq!(world.query::<&Overlay>().iter(world).count(), 0);
}

#[test]
fn test_creatures_pursue_the_boss() {
    let (mut host, boss, dolphin) = boss_scene(0.9);
    place(&mut host, boss, 700.0, WHALE_GROUND);
    place(&mut host, dolphin, 200.0, DOLPHIN_GROUND);

    host.tick(0.1);
    let behavior = host.world().get::<Behavior>(dolphin).unwrap().clone();
    assert!(behavior.pursuing);
    assert_eq!(behavior.move_target(), Some(700.0));
    assert!(behavior.move_speed >= 3.0 && behavior.move_speed <= 5.0);
    assert_eq!(state(&host, dolphin), "walk");

    let x0 = host.world().get::<MapPosition>(dolphin).unwrap().pos.x;
    host.tick(0.1);
    let x1 = host.world().get::<MapPosition>(dolphin).unwrap().pos.x;
    assert!(x1 > x0);
}
