//! Sprite animation playback state.
//!
//! `state` is the creature's logical animation state (`walk`, `drag`,
//! `cry`, ...). `clip_key` is the clip actually playing, which differs from
//! `"{state}-{sheet}"` only when the sheet has no row for that state and the
//! fallback clip was chosen instead.

use bevy_ecs::prelude::Component;

/// State played when a sheet lacks the requested one.
pub const FALLBACK_STATE: &str = "walk";

/// States that only make sense while travelling or being handled; they are
/// never picked as idle sub-states nor reached by clicking.
pub const TRANSIT_STATES: [&str; 4] = ["walk", "drag", "fall", "jump"];

pub fn is_transit_state(state: &str) -> bool {
    TRANSIT_STATES.contains(&state)
}

/// Key of the clip for `state` on `sheet`.
pub fn clip_key(state: &str, sheet: &str) -> String {
    format!("{state}-{sheet}")
}

#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub sheet: String,
    pub state: String,
    pub clip_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(sheet: impl Into<String>, state: impl Into<String>) -> Self {
        let sheet = sheet.into();
        let state = state.into();
        Self {
            clip_key: clip_key(&state, &sheet),
            sheet,
            state,
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }
}
