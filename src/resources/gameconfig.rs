//! Scene configuration resource.
//!
//! Settings loaded from an INI configuration file, with defaults that match
//! the page layout the scene was designed for (a 200 px strip along the
//! bottom of the window).
//!
//! # Configuration File Format
//!
//! ```ini
//! [viewport]
//! width = 1280
//! height = 200
//!
//! [scene]
//! frame_rate = 9
//! boss_scale = 1.5
//! asset_dir = ./media
//! catalog = ./media/sheets.json
//! target_fps = 60
//! debug = false
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use thiserror::Error;

/// Default safe values for startup
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 200;
const DEFAULT_FRAME_RATE: f32 = 9.0;
const DEFAULT_BOSS_SCALE: f32 = 1.5;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_ASSET_DIR: &str = "./media";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Ini(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid sprite catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// Initial viewport width in pixels; the window width wins after resize.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Animation frames per second for every clip.
    pub frame_rate: f32,
    /// Display scale of the boss relative to its frame size.
    pub boss_scale: f32,
    /// Directory sprite sheet images are read from.
    pub asset_dir: PathBuf,
    /// Optional JSON sprite catalog replacing the built-in one.
    pub catalog: Option<PathBuf>,
    pub target_fps: u32,
    /// Start with debug overlays on.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
            boss_scale: DEFAULT_BOSS_SCALE,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            catalog: None,
            target_fps: DEFAULT_TARGET_FPS,
            debug: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(ConfigError::Ini)?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_owned()).map_err(ConfigError::Ini)?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        // [viewport] section
        if let Some(width) = config.getuint("viewport", "width").ok().flatten() {
            self.viewport_width = width as u32;
        }
        if let Some(height) = config.getuint("viewport", "height").ok().flatten() {
            self.viewport_height = height as u32;
        }

        // [scene] section
        if let Some(fps) = config.getfloat("scene", "frame_rate").ok().flatten() {
            self.frame_rate = fps as f32;
        }
        if let Some(scale) = config.getfloat("scene", "boss_scale").ok().flatten() {
            self.boss_scale = scale as f32;
        }
        if let Some(dir) = config.get("scene", "asset_dir") {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(catalog) = config.get("scene", "catalog") {
            self.catalog = Some(PathBuf::from(catalog));
        }
        if let Some(fps) = config.getuint("scene", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(debug) = config.getbool("scene", "debug").ok().flatten() {
            self.debug = debug;
        }

        if self.frame_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if self.boss_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "boss_scale must be positive, got {}",
                self.boss_scale
            )));
        }

        info!(
            "Loaded config: {}x{} viewport, {} fps clips, boss scale {}, assets in {:?}",
            self.viewport_width,
            self.viewport_height,
            self.frame_rate,
            self.boss_scale,
            self.asset_dir
        );

        Ok(())
    }

    /// Display scale for a sprite of the given kind.
    pub fn scale_for(&self, is_boss: bool) -> f32 {
        if is_boss { self.boss_scale } else { 1.0 }
    }
}
