//! ECS components for creatures.
//!
//! Components hold the per-creature data the scene systems read and write:
//! identity, position, rendering, collision, behavior and interaction.
//!
//! Submodules overview:
//! - [`animation`] – logical state and the clip currently playing
//! - [`behavior`] – moving/idle mode, move target and re-roll timer
//! - [`boxcollider`] – axis-aligned rectangle for overlap and hit tests
//! - [`creature`] – name, visual kind, level and boss bookkeeping
//! - [`drag`] – press/drag tracking for pointer interaction
//! - [`mapposition`] – scene-space position (pivot) for an entity
//! - [`overlay`] – health bar and glow ring entities owned by a creature
//! - [`sprite`] – 2D sprite rendering component
//! - [`timer`] – one-shot timer that emits an event when finished
//! - [`tween`] – animated interpolation of position
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod behavior;
pub mod boxcollider;
pub mod creature;
pub mod drag;
pub mod mapposition;
pub mod overlay;
pub mod sprite;
pub mod timer;
pub mod tween;
pub mod zindex;
