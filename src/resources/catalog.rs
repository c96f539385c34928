//! Sprite sheet catalog.
//!
//! Describes every sprite sheet the scene can draw: image file, square frame
//! size, which visual kind it belongs to, and the ordered list of animation
//! states, each occupying one row (`sprite_line`, 1-based) with `frame_max`
//! frames. State order matters: clicking a creature cycles through it.
//!
//! The built-in catalog covers the sheets shipped with the game. A JSON file
//! with the same shape can replace it:
//!
//! ```json
//! { "sheets": [ {
//!     "name": "Sword Dolphin", "image_src": "Sword Dolphin.png",
//!     "frame_size": 128, "kind": "regular",
//!     "states": [ { "name": "stand", "sprite_line": 1, "frame_max": 1 } ]
//! } ] }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::components::creature::VisualKind;
use crate::resources::gameconfig::ConfigError;

pub const SWORD_DOLPHIN: &str = "Sword Dolphin";
pub const SPEAR_DOLPHIN: &str = "Spear Dolphin";
pub const STARPHIN: &str = "Starphin Shimeji";
pub const EVIL_WHALE: &str = "Evil Whale";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetState {
    pub name: String,
    pub sprite_line: u32,
    pub frame_max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub name: String,
    pub image_src: String,
    pub frame_size: u32,
    pub kind: VisualKind,
    pub states: Vec<SheetState>,
}

impl SheetConfig {
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteCatalog {
    pub sheets: Vec<SheetConfig>,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn sheet(name: &str, kind: VisualKind, rows: &[(&str, u32, u32)]) -> SheetConfig {
    SheetConfig {
        name: name.to_owned(),
        image_src: format!("{name}.png"),
        frame_size: 128,
        kind,
        states: rows
            .iter()
            .map(|&(state, sprite_line, frame_max)| SheetState {
                name: state.to_owned(),
                sprite_line,
                frame_max,
            })
            .collect(),
    }
}

const DOLPHIN_ROWS: [(&str, u32, u32); 10] = [
    ("stand", 1, 1),
    ("walk", 2, 4),
    ("happy", 3, 5),
    ("greet", 4, 4),
    ("jump", 5, 1),
    ("drag", 6, 4),
    ("fall", 7, 5),
    ("eat", 8, 2),
    ("music", 9, 2),
    ("victory", 10, 2),
];

impl SpriteCatalog {
    /// Sheets shipped with the game.
    pub fn builtin() -> Self {
        Self {
            sheets: vec![
                sheet(SWORD_DOLPHIN, VisualKind::Regular, &DOLPHIN_ROWS),
                sheet(SPEAR_DOLPHIN, VisualKind::Regular, &DOLPHIN_ROWS),
                sheet(
                    STARPHIN,
                    VisualKind::Regular,
                    &[
                        ("stand", 1, 1),
                        ("walk", 2, 4),
                        ("sit", 3, 1),
                        ("greet", 4, 4),
                        ("crawl", 8, 8),
                        ("climb", 9, 8),
                        ("jump", 5, 1),
                        ("fall", 6, 3),
                        ("drag", 7, 1),
                    ],
                ),
                sheet(
                    EVIL_WHALE,
                    VisualKind::Boss,
                    &[("drop", 1, 4), ("walk", 2, 4), ("attack", 3, 4), ("cry", 4, 4)],
                ),
            ],
        }
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(text)?;
        for sheet in &catalog.sheets {
            if sheet.frame_size == 0 {
                return Err(ConfigError::Invalid(format!(
                    "sheet '{}' has a zero frame size",
                    sheet.name
                )));
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&SheetConfig> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// First sheet of the given kind, used when a spec names no sheet.
    pub fn default_sheet(&self, kind: VisualKind) -> Option<&SheetConfig> {
        self.sheets.iter().find(|s| s.kind == kind)
    }
}
