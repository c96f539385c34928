//! Event types and observers used by the scene.
//!
//! Events decouple the systems that detect something (a finished tween, an
//! overlap, a pointer press) from the observers that react to it. Every event
//! here is triggered with `commands.trigger(..)` and handled by a global
//! observer registered by the host.
//!
//! Submodules:
//! - [`assets`] – requests and results exchanged with the sheet loader thread
//! - [`collision`] – overlaps that passed the cooldown and trigger roll
//! - [`input`] – pointer press/move/release routed to one creature
//! - [`lifecycle`] – add and remove creatures by name
//! - [`switchdebug`] – toggle debug rendering on/off
//! - [`timer`] – expired one-shot timers
//! - [`tween`] – position tweens that reached their destination
pub mod assets;
pub mod collision;
pub mod input;
pub mod lifecycle;
pub mod switchdebug;
pub mod timer;
pub mod tween;
