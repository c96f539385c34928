//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – clips built from loaded sprite sheets
//! - `assetloader` – bridge to the background sheet loader and batch queue
//! - `catalog` – sprite sheet descriptions (built-in or JSON)
//! - `cooldown` – per-pair collision cooldown stamps
//! - `debugmode` – presence toggles collider outlines
//! - `gameconfig` – INI-backed scene settings
//! - `input` – pointer capture
//! - `outbox` – notifications for the economy layer
//! - `registry` – name-keyed creature registry and the boss slot
//! - `rng` – injectable randomness
//! - `texturestore` – GPU textures keyed by sheet name
//! - `viewport` – scene surface size
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assetloader;
pub mod catalog;
pub mod cooldown;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod outbox;
pub mod registry;
pub mod rng;
pub mod texturestore;
pub mod viewport;
pub mod worldtime;
