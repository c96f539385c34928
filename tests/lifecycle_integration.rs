//! Lifecycle integration tests: adding, removing and re-leveling creatures
//! through a headless host, and batched sheet loading.

use std::path::Path;
use std::time::Duration;

use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Image};

use ranchscene::components::animation::Animation;
use ranchscene::components::creature::{Creature, CreatureSpec};
use ranchscene::components::mapposition::MapPosition;
use ranchscene::components::overlay::{Overlay, OverlayHandles};
use ranchscene::components::tween::TweenPosition;
use ranchscene::host::SceneHost;
use ranchscene::resources::assetloader::LoadQueue;
use ranchscene::resources::catalog::{
    EVIL_WHALE, SPEAR_DOLPHIN, STARPHIN, SWORD_DOLPHIN, SpriteCatalog,
};
use ranchscene::resources::gameconfig::SceneConfig;
use ranchscene::resources::registry::EntityRegistry;
use ranchscene::resources::rng::{SceneRng, ScriptedRandom};
use ranchscene::resources::texturestore::PendingTextures;
use ranchscene::resources::viewport::Viewport;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_config() -> SceneConfig {
    let mut config = SceneConfig::new();
    config.viewport_width = 1000;
    config.viewport_height = 200;
    config
}

/// Headless host with the dolphin and whale sheets already loaded.
fn make_host(sample: f32) -> SceneHost {
    let mut host = SceneHost::new_headless(
        make_config(),
        SpriteCatalog::builtin(),
        SceneRng::new(ScriptedRandom::constant(sample)),
    );
    host.preload_sheet(SWORD_DOLPHIN, 1280).unwrap();
    host.preload_sheet(EVIL_WHALE, 512).unwrap();
    host
}

fn overlay_count(host: &mut SceneHost) -> usize {
    let world = host.world_mut();
    world.query::<&Overlay>().iter(world).count()
}

/// Encode a plain sheet image of the given size as PNG at `path`.
fn write_sheet(path: &Path, width: i32, height: i32) {
    Image::gen_image_color(width, height, Color::SKYBLUE).export_image(path.to_str().unwrap());
}

/// PNG signature and IHDR header only: looks like a PNG, does not decode.
fn truncated_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

#[test]
fn test_add_places_creature_on_the_ground() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[CreatureSpec::regular("flipper", SWORD_DOLPHIN)]);

    let e = host.entity("flipper").unwrap();
    let pos = host.world().get::<MapPosition>(e).unwrap().pos;
    // half + r * (w - display) with a 128 px sprite in a 1000 px viewport
    assert!(approx_eq(pos.x, 64.0 + 0.5 * 872.0));
    assert!(approx_eq(pos.y, 200.0 - 64.0));
    // One behavior selection happened right away (0.5 fails the walk roll).
    let anim = host.world().get::<Animation>(e).unwrap();
    assert_eq!(anim.state, "eat");
}

#[test]
fn test_add_is_idempotent_by_name() {
    let mut host = make_host(0.5);
    let spec = CreatureSpec::regular("flipper", SWORD_DOLPHIN);
    host.set_desired_entities(&[spec.clone()]);
    let first = host.entity("flipper").unwrap();
    host.set_desired_entities(&[spec.clone(), spec]);
    host.tick(0.1);

    assert_eq!(host.entity("flipper"), Some(first));
    let world = host.world_mut();
    assert_eq!(world.query::<&Creature>().iter(world).count(), 1);
}

#[test]
fn test_second_boss_is_rejected() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[
        CreatureSpec::boss("whale", EVIL_WHALE),
        CreatureSpec::boss("whale2", EVIL_WHALE),
    ]);

    assert!(host.entity("whale").is_some());
    assert!(host.entity("whale2").is_none());
    assert_eq!(host.world().resource::<EntityRegistry>().len(), 1);
}

#[test]
fn test_remove_despawns_creature_and_overlays() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[
        CreatureSpec::regular("flipper", SWORD_DOLPHIN).with_level(3),
        CreatureSpec::boss("whale", EVIL_WHALE),
    ]);
    host.tick(0.1);
    // three rings plus the two health bar halves
    assert_eq!(overlay_count(&mut host), 5);

    let flipper = host.entity("flipper").unwrap();
    host.set_desired_entities(&[CreatureSpec::boss("whale", EVIL_WHALE)]);
    host.tick(0.1);

    assert!(host.entity("flipper").is_none());
    assert!(host.world().get_entity(flipper).is_err());
    assert_eq!(overlay_count(&mut host), 2);
}

#[test]
fn test_level_change_rebuilds_glow_rings() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[CreatureSpec::regular("flipper", SWORD_DOLPHIN).with_level(3)]);
    let e = host.entity("flipper").unwrap();
    let old_rings: Vec<Entity> = host
        .world()
        .get::<OverlayHandles>(e)
        .unwrap()
        .glow_rings
        .to_vec();
    assert_eq!(old_rings.len(), 3);

    host.set_desired_entities(&[CreatureSpec::regular("flipper", SWORD_DOLPHIN).with_level(1)]);
    host.tick(0.1);

    assert_eq!(host.world().get::<Creature>(e).unwrap().level, Some(1));
    assert_eq!(host.world().get::<OverlayHandles>(e).unwrap().glow_rings.len(), 1);
    for ring in old_rings {
        assert!(host.world().get_entity(ring).is_err());
    }
    assert_eq!(overlay_count(&mut host), 1);
}

#[test]
fn test_rings_follow_their_creature() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[CreatureSpec::regular("flipper", SWORD_DOLPHIN).with_level(2)]);
    host.tick(0.1);

    let e = host.entity("flipper").unwrap();
    let owner = host.world().get::<MapPosition>(e).unwrap().pos;
    let rings = host.world().get::<OverlayHandles>(e).unwrap().glow_rings.clone();
    for ring in rings {
        let pos = host.world().get::<MapPosition>(ring).unwrap().pos;
        assert!(approx_eq(pos.x, owner.x) && approx_eq(pos.y, owner.y));
    }
}

#[test]
fn test_boss_drops_in_from_above() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[CreatureSpec::boss("whale", EVIL_WHALE)]);
    let boss = host.entity("whale").unwrap();
    // 128 px frames drawn at 1.5x
    let ground = 200.0 - 96.0;

    host.tick(0.1);
    assert!(host.world().get::<MapPosition>(boss).unwrap().pos.y < ground);
    assert_eq!(host.world().get::<Animation>(boss).unwrap().state, "drop");

    for _ in 0..12 {
        host.tick(0.1);
    }
    assert!(host.world().get::<TweenPosition>(boss).is_none());
    assert!(approx_eq(host.world().get::<MapPosition>(boss).unwrap().pos.y, ground));
    assert_ne!(host.world().get::<Animation>(boss).unwrap().state, "drop");
}

#[test]
fn test_add_waits_for_its_sheet() {
    let mut host = SceneHost::new_headless(
        make_config(),
        SpriteCatalog::builtin(),
        SceneRng::new(ScriptedRandom::constant(0.5)),
    );
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
    ]);
    host.tick(0.1);
    assert!(host.entity("a").is_none());
    assert_eq!(host.world().resource::<LoadQueue>().pending.len(), 2);

    host.preload_sheet(SWORD_DOLPHIN, 1280).unwrap();
    host.tick(0.1);
    assert!(host.entity("a").is_some());
    assert!(host.entity("b").is_some());
    assert!(host.world().resource::<LoadQueue>().pending.is_empty());
}

#[test]
fn test_removing_queued_creature_drops_it() {
    let mut host = SceneHost::new_headless(
        make_config(),
        SpriteCatalog::builtin(),
        SceneRng::new(ScriptedRandom::constant(0.5)),
    );
    host.set_desired_entities(&[CreatureSpec::regular("a", SWORD_DOLPHIN)]);
    host.set_desired_entities(&[]);
    host.preload_sheet(SWORD_DOLPHIN, 1280).unwrap();
    host.tick(0.1);

    assert!(host.entity("a").is_none());
    assert!(host.world().resource::<LoadQueue>().pending.is_empty());
}

#[test]
fn test_unknown_sheet_is_rejected() {
    let mut host = make_host(0.5);
    host.set_desired_entities(&[CreatureSpec::regular("ghost", "No Such Sheet")]);
    host.tick(0.1);
    assert!(host.entity("ghost").is_none());
    assert!(host.world().resource::<LoadQueue>().pending.is_empty());
    assert!(host.preload_sheet("No Such Sheet", 128).is_err());
}

#[test]
fn test_batched_loading_from_disk() {
    let dir = std::env::temp_dir().join(format!("ranchscene-batch-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    write_sheet(&dir.join("Sword Dolphin.png"), 1280, 1280);
    // The spear dolphin sheet is cut short and the starphin sheet is missing.
    std::fs::write(dir.join("Spear Dolphin.png"), truncated_png(1280, 1280)).unwrap();

    let mut config = make_config();
    config.asset_dir = dir.clone();
    let mut host = SceneHost::new_headless(
        config,
        SpriteCatalog::builtin(),
        SceneRng::new(ScriptedRandom::constant(0.5)),
    );
    host.start_loader();
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
        CreatureSpec::regular("c", SPEAR_DOLPHIN),
        CreatureSpec::regular("e", STARPHIN),
    ]);
    // One request per sheet, however many creatures use it.
    assert_eq!(host.world().resource::<LoadQueue>().in_flight.len(), 3);

    for _ in 0..500 {
        host.tick(0.016);
        if !host.world().resource::<EntityRegistry>().is_empty() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    // The whole batch is released at once, minus the failed sheets.
    assert!(host.entity("a").is_some());
    assert!(host.entity("b").is_some());
    assert!(host.entity("c").is_none());
    assert!(host.entity("e").is_none());
    assert_eq!(host.world().resource::<EntityRegistry>().len(), 2);
    let queue = host.world().resource::<LoadQueue>();
    assert!(queue.pending.is_empty());
    assert!(queue.failed.contains(SPEAR_DOLPHIN));
    assert!(queue.failed.contains(STARPHIN));
    assert!(!queue.failed.contains(SWORD_DOLPHIN));

    // Only the decoded sheet waits for a texture upload.
    let pending = host.world().resource::<PendingTextures>();
    assert_eq!(pending.images.len(), 1);
    assert_eq!(pending.images[0].0, SWORD_DOLPHIN);

    // Later adds of a failed sheet are skipped, not retried.
    host.set_desired_entities(&[
        CreatureSpec::regular("a", SWORD_DOLPHIN),
        CreatureSpec::regular("b", SWORD_DOLPHIN),
        CreatureSpec::regular("d", SPEAR_DOLPHIN),
    ]);
    host.tick(0.016);
    assert!(host.entity("d").is_none());
    assert!(host.world().resource::<LoadQueue>().in_flight.is_empty());

    host.shutdown();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_resize_updates_viewport() {
    let mut host = make_host(0.5);
    host.resize(640.0, 180.0);
    assert_eq!(*host.world().resource::<Viewport>(), Viewport::new(640.0, 180.0));
}
