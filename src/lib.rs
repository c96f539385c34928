//! Dolphin ranch bottom scene library.
//!
//! This module exposes the scene's ECS components, resources, systems, and
//! events, plus the [`host::SceneHost`] wrapper, for use in integration tests
//! and by the windowed binary.

pub mod components;
pub mod events;
pub mod host;
pub mod resources;
pub mod systems;
