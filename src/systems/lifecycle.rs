//! Creature lifecycle observers.
//!
//! - [`on_add_creature`] instantiates a creature when its sheet is loaded, or
//!   queues it and requests the sheet otherwise. Adds are idempotent by name
//!   and a second boss is rejected.
//! - [`on_remove_creature`] despawns a creature with its overlays and clears
//!   every trace of it. Removing the boss credits the reward and ends the
//!   pursuit.
//! - [`on_level_changed`] rebuilds the glow rings of a creature.
//!
//! Every new creature gets one behavior selection right away. The boss's is
//! scripted: it appears above the ground playing `drop` and bounces down,
//! re-rolling once it lands.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::behavior::Behavior;
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{BossState, Creature, CreatureSpec, MAX_LEVEL};
use crate::components::drag::Draggable;
use crate::components::mapposition::MapPosition;
use crate::components::overlay::{Overlay, OverlayHandles, OverlayOf};
use crate::components::sprite::Sprite;
use crate::components::tween::{Easing, TweenFinish, TweenPosition};
use crate::components::zindex::ZIndex;
use crate::events::assets::AssetRequest;
use crate::events::lifecycle::{AddCreatureEvent, LevelChangedEvent, RemoveCreatureEvent};
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetloader::{AssetBridge, LoadQueue};
use crate::resources::catalog::SpriteCatalog;
use crate::resources::cooldown::CollisionCooldowns;
use crate::resources::gameconfig::SceneConfig;
use crate::resources::input::PointerCapture;
use crate::resources::outbox::{BOSS_REWARD, SceneNotice, SceneOutbox};
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::SceneRng;
use crate::resources::viewport::Viewport;
use crate::systems::behavior::reroll_now;

/// Duration of the boss's entrance fall.
pub const BOSS_DROP_DURATION: f32 = 1.0;

/// Scene state an instantiation reads.
pub struct SpawnContext<'a> {
    pub store: &'a AnimationStore,
    pub config: &'a SceneConfig,
    pub viewport: &'a Viewport,
}

/// Spawn a creature whose sheet is loaded and register it.
///
/// Returns `None` if the sheet is unknown to the store or the registry
/// refuses the name.
pub fn instantiate(
    commands: &mut Commands,
    registry: &mut EntityRegistry,
    rng: &mut SceneRng,
    ctx: &SpawnContext,
    spec: &CreatureSpec,
) -> Option<Entity> {
    let info = ctx.store.sheet(&spec.sheet)?;
    let is_boss = spec.kind.is_boss();
    let sprite = Sprite::new(&spec.sheet, info.frame_size, ctx.config.scale_for(is_boss));
    let (w, h) = (sprite.width, sprite.height);

    let viewport = ctx.viewport;
    let x = if viewport.w > w {
        w * 0.5 + rng.next() * (viewport.w - w)
    } else {
        viewport.w * 0.5
    };
    let ground = Vector2::new(x, viewport.ground_y(h));

    let creature = Creature {
        name: spec.name.clone(),
        kind: spec.kind,
        level: spec.level,
    };
    let mut behavior = Behavior::default();
    let mut anim = Animation::new(&spec.sheet, if is_boss { "drop" } else { "walk" });
    if !is_boss {
        reroll_now(
            spec.kind,
            x,
            w,
            viewport,
            &mut behavior,
            &mut anim,
            ctx.store,
            rng,
        );
    }
    if let Some(clip) = ctx.store.resolve(&anim.state, &spec.sheet) {
        anim.clip_key = clip;
    }

    let start = if is_boss {
        Vector2::new(x, ground.y - viewport.h)
    } else {
        ground
    };
    let z = spec.kind.z_index();
    let mut entity = commands.spawn((
        MapPosition { pos: start },
        sprite,
        anim,
        behavior,
        Draggable::default(),
        BoxCollider::centered(w, h),
        ZIndex(z),
    ));
    if is_boss {
        entity.insert((
            BossState::default(),
            TweenPosition::new(start, ground, BOSS_DROP_DURATION)
                .with_easing(Easing::BounceOut)
                .then(TweenFinish::Reroll),
        ));
    }
    let id = entity.id();

    if !registry.insert(&spec.name, id, is_boss) {
        log::warn!("Registry refused '{}'", spec.name);
        commands.entity(id).despawn();
        return None;
    }

    let handles = spawn_overlays(commands, id, &creature, z);
    commands.entity(id).insert((creature, handles));
    log::info!("Added '{}' ({:?}) at x={x:.0}", spec.name, spec.kind);
    Some(id)
}

/// Spawn the overlay entities of `creature`.
pub fn spawn_overlays(
    commands: &mut Commands,
    owner: Entity,
    creature: &Creature,
    owner_z: i32,
) -> OverlayHandles {
    let mut handles = OverlayHandles::default();
    let z = ZIndex(owner_z + 1);
    if creature.is_boss() {
        let back = commands
            .spawn((Overlay::HealthBarBack, OverlayOf(owner), MapPosition::new(0.0, 0.0), z))
            .id();
        let fill = commands
            .spawn((
                Overlay::HealthBarFill { ratio: 1.0 },
                OverlayOf(owner),
                MapPosition::new(0.0, 0.0),
                z,
            ))
            .id();
        handles.health_bar = Some([back, fill]);
    }
    handles.glow_rings = spawn_glow_rings(commands, owner, creature.glow_tier(), z);
    handles
}

fn spawn_glow_rings(
    commands: &mut Commands,
    owner: Entity,
    tier: u8,
    z: ZIndex,
) -> ArrayVec<Entity, { MAX_LEVEL as usize }> {
    (0..tier)
        .map(|ring| {
            commands
                .spawn((
                    Overlay::GlowRing { tier, ring },
                    OverlayOf(owner),
                    MapPosition::new(0.0, 0.0),
                    z,
                ))
                .id()
        })
        .collect()
}

/// Observer for [`AddCreatureEvent`].
#[allow(clippy::too_many_arguments)]
pub fn on_add_creature(
    trigger: On<AddCreatureEvent>,
    mut commands: Commands,
    mut registry: ResMut<EntityRegistry>,
    mut queue: ResMut<LoadQueue>,
    mut rng: ResMut<SceneRng>,
    bridge: Option<Res<AssetBridge>>,
    catalog: Res<SpriteCatalog>,
    config: Res<SceneConfig>,
    store: Res<AnimationStore>,
    viewport: Res<Viewport>,
) {
    let spec = &trigger.event().spec;
    if registry.contains(&spec.name) || queue.is_queued(&spec.name) {
        log::debug!("'{}' is already present", spec.name);
        return;
    }
    if spec.kind.is_boss()
        && (registry.has_boss() || queue.pending.iter().any(|s| s.kind.is_boss()))
    {
        log::warn!("Rejecting boss '{}': a boss is already present", spec.name);
        return;
    }
    let Some(sheet) = catalog.get(&spec.sheet) else {
        log::warn!("Rejecting '{}': unknown sheet '{}'", spec.name, spec.sheet);
        return;
    };
    if queue.failed.contains(&spec.sheet) {
        log::warn!("Skipping '{}': sheet '{}' failed to load", spec.name, spec.sheet);
        return;
    }

    if store.has_sheet(&spec.sheet) {
        let ctx = SpawnContext {
            store: &store,
            config: &config,
            viewport: &viewport,
        };
        instantiate(&mut commands, &mut registry, &mut rng, &ctx, spec);
        return;
    }

    queue.pending.push(spec.clone());
    if !queue.in_flight.insert(spec.sheet.clone()) {
        return;
    }
    match bridge {
        Some(bridge) => {
            let path = config.asset_dir.join(&sheet.image_src);
            log::info!("Loading sheet '{}' from {}", sheet.name, path.display());
            let request = AssetRequest::LoadSheet {
                sheet: sheet.name.clone(),
                path,
            };
            if bridge.tx_req.send(request).is_err() {
                log::error!("Sheet loader is gone; '{}' cannot load", sheet.name);
                queue.in_flight.remove(&sheet.name);
                queue.failed.insert(sheet.name.clone());
            }
        }
        None => log::debug!("Sheet '{}' awaits preloading", sheet.name),
    }
}

/// Observer for [`RemoveCreatureEvent`].
#[allow(clippy::too_many_arguments)]
pub fn on_remove_creature(
    trigger: On<RemoveCreatureEvent>,
    mut commands: Commands,
    mut registry: ResMut<EntityRegistry>,
    mut queue: ResMut<LoadQueue>,
    mut cooldowns: ResMut<CollisionCooldowns>,
    mut capture: ResMut<PointerCapture>,
    mut outbox: ResMut<SceneOutbox>,
    handles: Query<&OverlayHandles>,
    mut behaviors: Query<&mut Behavior>,
) {
    let name = &trigger.event().name;
    if queue.forget(name) {
        log::info!("Dropped queued '{name}'");
    }
    let was_boss = registry
        .boss()
        .is_some_and(|boss| registry.get(name) == Some(boss));
    let Some(entity) = registry.remove(name) else {
        return;
    };

    if let Ok(handles) = handles.get(entity) {
        for overlay in handles.all() {
            commands.entity(overlay).try_despawn();
        }
    }
    commands.entity(entity).try_despawn();
    cooldowns.forget(name);
    capture.release_if(entity);
    log::info!("Removed '{name}'");

    if was_boss {
        outbox.push(SceneNotice::BossRemoved);
        outbox.push(SceneNotice::RewardGranted {
            amount: BOSS_REWARD,
        });
        for mut behavior in behaviors.iter_mut() {
            behavior.pursuing = false;
            behavior.expire();
        }
        log::info!("Boss gone, {BOSS_REWARD} credited");
    }
}

/// Observer for [`LevelChangedEvent`].
pub fn on_level_changed(
    trigger: On<LevelChangedEvent>,
    mut commands: Commands,
    registry: Res<EntityRegistry>,
    mut creatures: Query<(&mut Creature, &ZIndex, &mut OverlayHandles)>,
) {
    let event = trigger.event();
    let Some(entity) = registry.get(&event.name) else {
        return;
    };
    let Ok((mut creature, z, mut handles)) = creatures.get_mut(entity) else {
        return;
    };
    if creature.level == event.level {
        return;
    }
    creature.level = event.level;
    for ring in handles.glow_rings.drain(..) {
        commands.entity(ring).try_despawn();
    }
    handles.glow_rings = spawn_glow_rings(
        &mut commands,
        entity,
        creature.glow_tier(),
        ZIndex(z.0 + 1),
    );
    log::info!("'{}' is now level {:?}", creature.name, creature.level);
}
