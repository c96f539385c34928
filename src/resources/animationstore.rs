//! Animation resource registry.
//!
//! Clips are built once per sprite sheet when the sheet finishes loading and
//! are shared by every creature drawn with that sheet. Systems look up a clip
//! by its `"{state}-{sheet}"` key; nothing mutates a clip after it is built.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use crate::components::animation::{FALLBACK_STATE, clip_key};
use crate::components::creature::VisualKind;
use crate::resources::assetloader::AssetError;
use crate::resources::catalog::SheetConfig;

/// Immutable data describing one state's animation on a sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: Arc<str>,
    /// Index of the first frame, counting cells left-to-right, top-to-bottom.
    pub start_frame: usize,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Cells per sheet row.
    pub frames_per_row: usize,
    /// Square cell size in pixels.
    pub frame_size: f32,
    /// Frames per second playback speed. Every clip loops.
    pub fps: f32,
}

impl AnimationResource {
    /// Top-left pixel of frame `frame_index` of this clip on the sheet.
    pub fn frame_offset(&self, frame_index: usize) -> Vector2 {
        let cell = self.start_frame + frame_index.min(self.frame_count.saturating_sub(1));
        let per_row = self.frames_per_row.max(1);
        Vector2 {
            x: (cell % per_row) as f32 * self.frame_size,
            y: (cell / per_row) as f32 * self.frame_size,
        }
    }
}

/// What the scene knows about a loaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetInfo {
    pub kind: VisualKind,
    pub frame_size: f32,
    pub frames_per_row: usize,
    /// State names in catalog order.
    pub states: Vec<String>,
}

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
    pub sheets: FxHashMap<String, SheetInfo>,
}

impl AnimationStore {
    /// Build and register the clips of a sheet whose image is `image_width`
    /// pixels wide. Registering an already known sheet is a no-op.
    pub fn register_sheet(
        &mut self,
        sheet: &SheetConfig,
        image_width: u32,
        fps: f32,
    ) -> Result<(), AssetError> {
        if self.sheets.contains_key(&sheet.name) {
            return Ok(());
        }
        let frames_per_row = (image_width / sheet.frame_size.max(1)) as usize;
        if frames_per_row == 0 {
            return Err(AssetError::FrameTooLarge {
                sheet: sheet.name.clone(),
                frame_size: sheet.frame_size,
                width: image_width,
            });
        }

        let tex_key: Arc<str> = Arc::from(sheet.name.as_str());
        for state in &sheet.states {
            let line = state.sprite_line.max(1) as usize;
            let clip = AnimationResource {
                tex_key: tex_key.clone(),
                start_frame: (line - 1) * frames_per_row,
                frame_count: state.frame_max.max(1) as usize,
                frames_per_row,
                frame_size: sheet.frame_size as f32,
                fps,
            };
            self.animations
                .insert(clip_key(&state.name, &sheet.name), clip);
        }
        self.sheets.insert(
            sheet.name.clone(),
            SheetInfo {
                kind: sheet.kind,
                frame_size: sheet.frame_size as f32,
                frames_per_row,
                states: sheet.state_names().map(str::to_owned).collect(),
            },
        );
        log::info!(
            "Built {} clips for sheet '{}' ({} frames per row)",
            sheet.states.len(),
            sheet.name,
            frames_per_row
        );
        Ok(())
    }

    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    pub fn sheet(&self, sheet: &str) -> Option<&SheetInfo> {
        self.sheets.get(sheet)
    }

    /// Resolve the clip key to play for `state`, falling back to `walk` when
    /// the sheet has no such row. `None` if even the fallback is missing.
    pub fn resolve(&self, state: &str, sheet: &str) -> Option<String> {
        let key = clip_key(state, sheet);
        if self.animations.contains_key(&key) {
            return Some(key);
        }
        let fallback = clip_key(FALLBACK_STATE, sheet);
        if self.animations.contains_key(&fallback) {
            log::warn!("Animation {key} not found, falling back to {FALLBACK_STATE}");
            Some(fallback)
        } else {
            log::warn!("Animation {key} not found and sheet has no {FALLBACK_STATE} clip");
            None
        }
    }
}
