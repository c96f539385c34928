//! ECS resources that bridge the frame thread with the background sheet loader.
//!
//! Use [`setup_asset_loader`] once during initialization to spawn the loader
//! thread and insert the [`AssetBridge`] resource. Call
//! [`shutdown_asset_loader`] during teardown to stop and join the thread.
//!
//! [`LoadQueue`] holds the batching bookkeeping and exists with or without a
//! bridge: creatures whose sheet is not loaded yet wait in it until every
//! sheet of the current batch has answered.

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::components::creature::CreatureSpec;
use crate::events::assets::{AssetRequest, AssetResult};
use crate::systems::assets::loader_thread;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: raylib::core::error::Error,
    },
    #[error("sheet '{sheet}' is not in the catalog")]
    UnknownSheet { sheet: String },
    #[error("sheet '{sheet}' frame size {frame_size} does not fit an image {width} px wide")]
    FrameTooLarge {
        sheet: String,
        frame_size: u32,
        width: u32,
    },
}

/// Shared bridge between the ECS world and the loader thread.
#[derive(Resource)]
pub struct AssetBridge {
    /// Sender for [`AssetRequest`] messages (ECS -> loader thread).
    pub tx_req: Sender<AssetRequest>,
    /// Receiver for [`AssetResult`] messages (loader thread -> ECS).
    pub rx_res: Receiver<AssetResult>,
    /// Join handle for the background loader thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Batch bookkeeping for sheet loads.
#[derive(Resource, Debug, Default)]
pub struct LoadQueue {
    /// Sheets requested and not answered yet.
    pub in_flight: FxHashSet<String>,
    /// Sheets that failed to load. Never retried.
    pub failed: FxHashSet<String>,
    /// Creatures waiting for the current batch, in arrival order.
    pub pending: Vec<CreatureSpec>,
}

impl LoadQueue {
    pub fn is_queued(&self, name: &str) -> bool {
        self.pending.iter().any(|spec| spec.name == name)
    }

    /// Drop a queued creature. Returns `true` if it was queued.
    pub fn forget(&mut self, name: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|spec| spec.name != name);
        self.pending.len() != before
    }

    pub fn batch_done(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Take every queued creature once the batch has fully answered.
    pub fn take_ready(&mut self) -> Vec<CreatureSpec> {
        if self.batch_done() {
            std::mem::take(&mut self.pending)
        } else {
            Vec::new()
        }
    }
}

/// Spawn the loader thread and register the bridge resource.
pub fn setup_asset_loader(world: &mut World) {
    let (tx_req, rx_req) = unbounded::<AssetRequest>();
    let (tx_res, rx_res) = unbounded::<AssetResult>();

    let handle = std::thread::spawn(move || loader_thread(rx_req, tx_res));

    world.insert_resource(AssetBridge {
        tx_req,
        rx_res,
        handle,
    });
    world.init_resource::<LoadQueue>();
}

/// Request shutdown of the loader thread and join it.
pub fn shutdown_asset_loader(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AssetBridge>() {
        let _ = bridge.tx_req.send(AssetRequest::Shutdown);
        let _ = bridge.handle.join();
    }
}
