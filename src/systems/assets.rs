//! Sprite sheet loading, backed by a dedicated thread.
//!
//! - [`loader_thread`] runs on its own OS thread, reads and decodes sheet
//!   images and answers every [`AssetRequest::LoadSheet`] with exactly one
//!   [`AssetResult`]. An image that does not decode is a failed sheet.
//! - [`poll_asset_results`] non-blockingly drains those answers on the frame
//!   thread, builds the clips of loaded sheets, and releases the creatures
//!   queued behind the batch once no sheet is in flight any more.
//! - [`realize_textures`] uploads loaded images to the GPU (windowed host only).
//!
//! The frame thread alone mutates the animation store and the load queue; the
//! loader thread only reads and decodes files.

use std::path::Path;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use raylib::prelude::{Image, RaylibHandle, RaylibThread};

use crate::events::assets::{AssetRequest, AssetResult};
use crate::events::lifecycle::AddCreatureEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetloader::{AssetBridge, AssetError, LoadQueue};
use crate::resources::catalog::SpriteCatalog;
use crate::resources::gameconfig::SceneConfig;
use crate::resources::texturestore::{PendingTextures, SheetImage, TextureStore};

/// Decoder hint for `path`, from its extension. Defaults to `.png`.
fn file_type(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".png".to_owned())
}

/// Read a sheet image, decode it and return its pixel size.
///
/// The decoded pixels are dropped here; only the encoded bytes travel to
/// the frame thread, where the texture is created.
pub fn read_sheet(path: &Path) -> Result<(u32, u32, SheetImage), AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_type = file_type(path);
    let decoded =
        Image::load_image_from_mem(&file_type, &bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let (width, height) = (decoded.width().max(0) as u32, decoded.height().max(0) as u32);
    Ok((width, height, SheetImage { file_type, bytes }))
}

/// Entry point of the loader thread. Blocks until [`AssetRequest::Shutdown`]
/// or until the frame thread drops its sender.
pub fn loader_thread(rx_req: Receiver<AssetRequest>, tx_res: Sender<AssetResult>) {
    log::debug!(
        "Sheet loader starting (id={:?})",
        std::thread::current().id()
    );
    while let Ok(request) = rx_req.recv() {
        match request {
            AssetRequest::LoadSheet { sheet, path } => {
                let result = match read_sheet(&path) {
                    Ok((width, height, image)) => AssetResult::SheetLoaded {
                        sheet,
                        width,
                        height,
                        image,
                    },
                    Err(error) => AssetResult::SheetFailed { sheet, error },
                };
                if tx_res.send(result).is_err() {
                    break;
                }
            }
            AssetRequest::Shutdown => break,
        }
    }
    log::debug!("Sheet loader exiting");
}

/// Record one loaded sheet: build its clips and keep its image for upload.
///
/// On failure the sheet is marked failed and never retried.
pub fn register_loaded_sheet(
    sheet: &str,
    width: u32,
    image: Option<SheetImage>,
    catalog: &SpriteCatalog,
    config: &SceneConfig,
    store: &mut AnimationStore,
    queue: &mut LoadQueue,
    textures: &mut PendingTextures,
) {
    queue.in_flight.remove(sheet);
    let Some(sheet_config) = catalog.get(sheet) else {
        log::error!("Loaded sheet '{sheet}' is not in the catalog");
        queue.failed.insert(sheet.to_owned());
        return;
    };
    match store.register_sheet(sheet_config, width, config.frame_rate) {
        Ok(()) => {
            if let Some(image) = image {
                textures.images.push((sheet.to_owned(), image));
            }
        }
        Err(e) => {
            log::error!("Failed to build clips: {e}");
            queue.failed.insert(sheet.to_owned());
        }
    }
}

/// Drain loader answers and release queued creatures once the batch is done.
#[allow(clippy::too_many_arguments)]
pub fn poll_asset_results(
    bridge: Option<Res<AssetBridge>>,
    catalog: Res<SpriteCatalog>,
    config: Res<SceneConfig>,
    mut store: ResMut<AnimationStore>,
    mut queue: ResMut<LoadQueue>,
    mut textures: ResMut<PendingTextures>,
    mut commands: Commands,
) {
    if let Some(bridge) = bridge {
        for result in bridge.rx_res.try_iter() {
            match result {
                AssetResult::SheetLoaded {
                    sheet,
                    width,
                    height,
                    image,
                } => {
                    log::info!("Sheet '{sheet}' loaded ({width}x{height})");
                    register_loaded_sheet(
                        &sheet,
                        width,
                        Some(image),
                        &catalog,
                        &config,
                        &mut store,
                        &mut queue,
                        &mut textures,
                    );
                }
                AssetResult::SheetFailed { sheet, error } => {
                    log::error!("Failed to load sheet '{sheet}': {error}");
                    queue.in_flight.remove(&sheet);
                    queue.failed.insert(sheet);
                }
            }
        }
    }

    for spec in queue.take_ready() {
        if queue.failed.contains(&spec.sheet) {
            log::warn!(
                "Dropping '{}': sheet '{}' failed to load",
                spec.name,
                spec.sheet
            );
            continue;
        }
        commands.trigger(AddCreatureEvent { spec });
    }
}

/// Upload images waiting in [`PendingTextures`] into the [`TextureStore`].
pub fn realize_textures(
    mut pending: ResMut<PendingTextures>,
    mut textures: NonSendMut<TextureStore>,
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
) {
    for (sheet, image) in pending.images.drain(..) {
        let texture = Image::load_image_from_mem(&image.file_type, &image.bytes)
            .and_then(|image| rl.load_texture_from_image(&thread, &image));
        match texture {
            Ok(texture) => textures.insert(sheet, texture),
            Err(e) => log::error!("Failed to upload sheet '{sheet}': {e}"),
        }
    }
}
