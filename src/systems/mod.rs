//! Scene systems and observers.
//!
//! This module groups the ECS systems that advance the scene each frame and
//! the observers that react to its events.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and switch logical states
//! - [`assets`] – sheet loader thread, result polling, texture upload
//! - [`behavior`] – per-creature re-roll scheduler and boss pursuit
//! - [`collision`] – pairwise overlap checks with per-pair cooldown
//! - [`input`] – click versus drag, raylib pointer polling
//! - [`lifecycle`] – add, remove and level observers
//! - [`movement`] – step creatures toward their move target
//! - [`overlay`] – keep health bars and glow rings on their owners
//! - [`render`] – draw the scene and debug overlays using Raylib
//! - [`resolver`] – push-apart, boss escalation and bounce
//! - [`time`] – update simulation time, timers and boss choreography
//! - [`tween`] – position tweens and landing sequences

pub mod animation;
pub mod assets;
pub mod behavior;
pub mod collision;
pub mod input;
pub mod lifecycle;
pub mod movement;
pub mod overlay;
pub mod render;
pub mod resolver;
pub mod time;
pub mod tween;
