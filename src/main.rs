//! Dolphin ranch scene viewer.
//!
//! Opens the bottom-of-page scene in its own window using:
//! - **raylib** for windowing, textures and drawing
//! - **bevy_ecs** for the creature entities and the frame schedule
//!
//! Creatures come from the command line; the economy layer that normally
//! supplies them is not part of this binary. Notices it would receive are
//! logged instead.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --creature Flipper:2 --creature Splash --boss
//! ```
//!
//! F11 toggles collider outlines.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;

use ranchscene::components::creature::{CreatureSpec, VisualKind};
use ranchscene::host;
use ranchscene::resources::catalog::SpriteCatalog;
use ranchscene::resources::gameconfig::SceneConfig;

/// Dolphin ranch bottom scene
#[derive(Parser)]
#[command(version, about = "Wandering dolphins, one evil whale.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Creature to show, as NAME or NAME:LEVEL. Repeatable.
    #[arg(long = "creature", value_name = "NAME[:LEVEL]", value_parser = parse_creature)]
    creatures: Vec<(String, Option<u8>)>,

    /// Bring in the boss.
    #[arg(long)]
    boss: bool,

    /// Start with debug drawing on.
    #[arg(long)]
    debug: bool,
}

fn parse_creature(arg: &str) -> Result<(String, Option<u8>), String> {
    let (name, level) = match arg.split_once(':') {
        Some((name, level)) => {
            let level = level
                .parse::<u8>()
                .map_err(|e| format!("invalid level '{level}': {e}"))?;
            (name, Some(level))
        }
        None => (arg, None),
    };
    if name.is_empty() {
        return Err("creature name is empty".to_owned());
    }
    Ok((name.to_owned(), level))
}

/// Turn the command line into specs, spreading regular creatures over the
/// regular sheets of the catalog.
fn desired_specs(
    creatures: &[(String, Option<u8>)],
    boss: bool,
    catalog: &SpriteCatalog,
) -> Vec<CreatureSpec> {
    let regular: Vec<&str> = catalog
        .sheets
        .iter()
        .filter(|s| s.kind == VisualKind::Regular)
        .map(|s| s.name.as_str())
        .collect();

    let mut specs: Vec<CreatureSpec> = Vec::new();
    if !regular.is_empty() {
        for (i, (name, level)) in creatures.iter().enumerate() {
            let mut spec = CreatureSpec::regular(name, regular[i % regular.len()]);
            spec.level = *level;
            specs.push(spec);
        }
    }
    if boss {
        match catalog.default_sheet(VisualKind::Boss) {
            Some(sheet) => specs.push(CreatureSpec::boss(&sheet.name, &sheet.name)),
            None => log::warn!("No boss sheet in the catalog"),
        }
    }
    specs
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SceneConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; using defaults");
    }
    if cli.debug {
        config.debug = true;
    }

    let catalog = match &config.catalog {
        Some(path) => SpriteCatalog::load_from_file(path).unwrap_or_else(|e| {
            log::error!("{e}; using the built-in catalog");
            SpriteCatalog::builtin()
        }),
        None => SpriteCatalog::builtin(),
    };

    let specs = desired_specs(&cli.creatures, cli.boss, &catalog);
    log::info!("Starting with {} creature(s)", specs.len());
    host::run(config, catalog, specs);
}
