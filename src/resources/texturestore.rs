//! GPU textures for loaded sprite sheets.
//!
//! The loader thread reads and validates images; textures must be created on the thread
//! that owns the raylib context. Decoded sheets wait in [`PendingTextures`]
//! until the windowed host realizes them into the non-send [`TextureStore`].
//! A headless host never drains the pending list.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

/// Textures keyed by sheet name.
#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

/// Encoded sheet image as read from disk.
#[derive(Debug, Clone)]
pub struct SheetImage {
    /// Extension raylib picks the decoder by, e.g. `.png`.
    pub file_type: String,
    pub bytes: Vec<u8>,
}

/// Sheet images read by the loader and not yet uploaded to the GPU.
#[derive(Resource, Debug, Default)]
pub struct PendingTextures {
    pub images: Vec<(String, SheetImage)>,
}
