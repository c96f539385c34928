//! Debug toggle resource.
//!
//! The mere presence of this resource enables collider outlines and the
//! status line. Remove it to disable debug drawing.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws debug overlays.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
