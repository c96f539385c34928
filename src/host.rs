//! Scene host.
//!
//! [`SceneHost`] owns the ECS world and the frame schedule. The view layer
//! talks to the scene only through it:
//!
//! - [`SceneHost::set_desired_entities`] diffs the desired creature list by
//!   name against what is live or queued, and adds, removes or re-levels.
//! - [`SceneHost::resize`] updates the viewport.
//! - [`SceneHost::drain_notices`] hands out the economy notifications.
//!
//! A host built with [`SceneHost::new_headless`] has no window, no loader
//! thread and no textures; sheets are made available with
//! [`SceneHost::preload_sheet`] and pointer input is injected with
//! [`SceneHost::pointer`]. [`run`] opens a raylib window around the same
//! host and drives it until the window closes.

use bevy_ecs::prelude::*;
use raylib::prelude::{RaylibHandle, RaylibThread, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, CreatureSpec};
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::events::input::{PointerEvent, PointerKind};
use crate::events::lifecycle::{AddCreatureEvent, LevelChangedEvent, RemoveCreatureEvent};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetloader::{
    AssetBridge, AssetError, LoadQueue, setup_asset_loader, shutdown_asset_loader,
};
use crate::resources::catalog::SpriteCatalog;
use crate::resources::cooldown::CollisionCooldowns;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::SceneConfig;
use crate::resources::input::PointerCapture;
use crate::resources::outbox::{SceneNotice, SceneOutbox};
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::SceneRng;
use crate::resources::texturestore::{PendingTextures, TextureStore};
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::assets::{poll_asset_results, realize_textures};
use crate::systems::behavior::behavior_scheduler;
use crate::systems::collision::collision_detector;
use crate::systems::input::{on_pointer, pick_topmost, poll_debug_key, poll_pointer};
use crate::systems::lifecycle::{on_add_creature, on_level_changed, on_remove_creature};
use crate::systems::movement::movement;
use crate::systems::overlay::refresh_overlays;
use crate::systems::render::render_pass;
use crate::systems::resolver::resolve_collision;
use crate::systems::time::{on_timer, update_timers, update_world_time};
use crate::systems::tween::{on_tween_finished, tween_mapposition_system};

pub struct SceneHost {
    world: World,
    update: Schedule,
    /// Raylib input polling and texture upload, windowed hosts only.
    frame_input: Option<Schedule>,
}

impl SceneHost {
    /// Build a scene without window or loader thread.
    pub fn new_headless(config: SceneConfig, catalog: SpriteCatalog, rng: SceneRng) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(Viewport::new(
            config.viewport_width as f32,
            config.viewport_height as f32,
        ));
        if config.debug {
            world.insert_resource(DebugMode {});
        }
        world.insert_resource(config);
        world.insert_resource(catalog);
        world.insert_resource(rng);
        world.init_resource::<AnimationStore>();
        world.init_resource::<EntityRegistry>();
        world.init_resource::<LoadQueue>();
        world.init_resource::<CollisionCooldowns>();
        world.init_resource::<SceneOutbox>();
        world.init_resource::<PointerCapture>();
        world.init_resource::<PendingTextures>();

        world.add_observer(on_add_creature);
        world.add_observer(on_remove_creature);
        world.add_observer(on_level_changed);
        world.add_observer(on_timer);
        world.add_observer(on_tween_finished);
        world.add_observer(resolve_collision);
        world.add_observer(on_pointer);
        world.add_observer(switch_debug_observer);
        world.flush();

        let mut update = Schedule::default();
        update.add_systems(
            (
                poll_asset_results,
                update_timers,
                tween_mapposition_system,
                behavior_scheduler,
                movement,
                collision_detector,
                refresh_overlays,
                animation,
            )
                .chain(),
        );

        Self {
            world,
            update,
            frame_input: None,
        }
    }

    /// Spawn the background sheet loader. Adds of unloaded sheets are then
    /// read from [`SceneConfig::asset_dir`] instead of waiting for a preload.
    pub fn start_loader(&mut self) {
        if !self.world.contains_resource::<AssetBridge>() {
            setup_asset_loader(&mut self.world);
        }
    }

    /// Stop and join the loader thread, if any.
    pub fn shutdown(&mut self) {
        shutdown_asset_loader(&mut self.world);
    }

    /// Make a sheet available without reading it from disk, as if the loader
    /// had answered with an image `image_width` pixels wide. Creatures queued
    /// behind it are released on the next tick.
    pub fn preload_sheet(&mut self, sheet: &str, image_width: u32) -> Result<(), AssetError> {
        let Some(sheet_config) = self.world.resource::<SpriteCatalog>().get(sheet).cloned() else {
            return Err(AssetError::UnknownSheet {
                sheet: sheet.to_owned(),
            });
        };
        let fps = self.world.resource::<SceneConfig>().frame_rate;
        let result = self
            .world
            .resource_mut::<AnimationStore>()
            .register_sheet(&sheet_config, image_width, fps);
        let mut queue = self.world.resource_mut::<LoadQueue>();
        queue.in_flight.remove(sheet);
        if result.is_err() {
            queue.failed.insert(sheet.to_owned());
        }
        result
    }

    /// Advance the scene by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        if let Some(input) = self.frame_input.as_mut() {
            input.run(&mut self.world);
        }
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Reconcile the scene with the desired creature list.
    ///
    /// Names present (live or queued) but not desired are removed, desired
    /// names not present are added, and present names whose level changed
    /// are re-leveled.
    pub fn set_desired_entities(&mut self, desired: &[CreatureSpec]) {
        let present: Vec<String> = {
            let registry = self.world.resource::<EntityRegistry>();
            let queue = self.world.resource::<LoadQueue>();
            registry
                .names()
                .map(str::to_owned)
                .chain(queue.pending.iter().map(|spec| spec.name.clone()))
                .collect()
        };

        for name in present.iter() {
            if !desired.iter().any(|spec| &spec.name == name) {
                self.world.trigger(RemoveCreatureEvent { name: name.clone() });
            }
        }

        for spec in desired {
            if self.world.resource::<EntityRegistry>().contains(&spec.name) {
                self.world.trigger(LevelChangedEvent {
                    name: spec.name.clone(),
                    level: spec.level,
                });
                continue;
            }
            let queued = {
                let mut queue = self.world.resource_mut::<LoadQueue>();
                match queue.pending.iter_mut().find(|s| s.name == spec.name) {
                    Some(queued) => {
                        queued.level = spec.level;
                        true
                    }
                    None => false,
                }
            };
            if queued {
                continue;
            }
            self.world.trigger(AddCreatureEvent { spec: spec.clone() });
        }
        self.world.flush();
    }

    pub fn resize(&mut self, w: f32, h: f32) {
        let mut viewport = self.world.resource_mut::<Viewport>();
        viewport.w = w;
        viewport.h = h;
        log::debug!("Viewport resized to {w}x{h}");
    }

    /// Notifications for the economy layer since the last call, in order.
    pub fn drain_notices(&mut self) -> Vec<SceneNotice> {
        self.world.resource_mut::<SceneOutbox>().drain()
    }

    /// Inject a pointer event for the creature called `name`, stamped with
    /// the current scene time. Returns `false` if no such creature is live.
    pub fn pointer(&mut self, name: &str, kind: PointerKind, pos: Vector2) -> bool {
        let Some(entity) = self.entity(name) else {
            return false;
        };
        let time = self.world.resource::<WorldTime>().elapsed;
        self.world.trigger(PointerEvent {
            entity,
            kind,
            pos,
            time,
        });
        self.world.flush();
        true
    }

    /// Topmost creature under `point`.
    pub fn pick(&mut self, point: Vector2) -> Option<Entity> {
        let mut q = self
            .world
            .query_filtered::<(Entity, &MapPosition, &BoxCollider, &ZIndex), With<Creature>>();
        pick_topmost(point, q.iter(&self.world))
    }

    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.world.resource::<EntityRegistry>().get(name)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// Open the scene window and run it until it is closed.
pub fn run(config: SceneConfig, catalog: SpriteCatalog, desired: Vec<CreatureSpec>) {
    let (mut rl, thread) = raylib::init()
        .size(config.viewport_width as i32, config.viewport_height as i32)
        .resizable()
        .title("Dolphin Ranch")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let mut host = SceneHost::new_headless(config, catalog, SceneRng::default());
    host.start_loader();
    host.world.insert_non_send_resource(TextureStore::new());
    host.world.insert_non_send_resource(rl);
    host.world.insert_non_send_resource(thread);

    let mut frame_input = Schedule::default();
    frame_input.add_systems((poll_pointer, poll_debug_key, realize_textures).chain());
    host.frame_input = Some(frame_input);

    host.set_desired_entities(&desired);

    while !host
        .world
        .non_send_resource::<RaylibHandle>()
        .window_should_close()
    {
        let (dt, resized) = {
            let rl = host.world.non_send_resource::<RaylibHandle>();
            let resized = rl
                .is_window_resized()
                .then(|| (rl.get_screen_width() as f32, rl.get_screen_height() as f32));
            (rl.get_frame_time(), resized)
        };
        if let Some((w, h)) = resized {
            host.resize(w, h);
        }

        host.tick(dt);

        for notice in host.drain_notices() {
            log::info!("Scene notice: {notice:?}");
        }

        // Drawing borrows the handle mutably while the renderer reads the world.
        let Some(mut rl) = host.world.remove_non_send_resource::<RaylibHandle>() else {
            break;
        };
        let Some(thread) = host.world.remove_non_send_resource::<RaylibThread>() else {
            host.world.insert_non_send_resource(rl);
            break;
        };
        {
            let mut d = rl.begin_drawing(&thread);
            render_pass(&mut host.world, &mut d);
        }
        host.world.insert_non_send_resource(rl);
        host.world.insert_non_send_resource(thread);
    }

    host.shutdown();
}
