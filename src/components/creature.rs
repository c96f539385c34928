//! Creature identity components.
//!
//! Every on-screen creature carries a [`Creature`] component holding its
//! stable name, its [`VisualKind`] and the optional level supplied by the
//! economy layer. The boss additionally carries a [`BossState`].
//!
//! [`CreatureSpec`] is the declarative description the host receives from
//! the view layer and diffs against the registry.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Highest level that still adds a glow ring.
pub const MAX_LEVEL: u8 = 5;

/// Visual category of a creature.
///
/// Determines the display scale, the available behaviors and the draw layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualKind {
    /// A regular dolphin.
    Regular,
    /// The single adversary creature.
    Boss,
}

impl VisualKind {
    pub fn is_boss(self) -> bool {
        matches!(self, VisualKind::Boss)
    }

    /// Base draw layer for sprites of this kind.
    pub fn z_index(self) -> i32 {
        match self {
            VisualKind::Regular => 0,
            VisualKind::Boss => 10,
        }
    }
}

/// Identity of a live creature.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Creature {
    /// Registry key. Stable for the creature's lifetime.
    pub name: String,
    pub kind: VisualKind,
    /// Cosmetic glow tier, regular creatures only.
    pub level: Option<u8>,
}

impl Creature {
    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    /// Number of glow rings to draw for the current level.
    pub fn glow_tier(&self) -> u8 {
        match (self.kind, self.level) {
            (VisualKind::Regular, Some(level)) => level.min(MAX_LEVEL),
            _ => 0,
        }
    }
}

/// Boss-only bookkeeping.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct BossState {
    /// Resolved collisions so far. Never decreases.
    pub collision_count: u32,
    /// Set once the defeat threshold is reached; removal is pending.
    pub defeated: bool,
    /// True while the escalation flourish owns the boss's state.
    pub scripted: bool,
}

/// Desired creature as described by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSpec {
    pub name: String,
    pub kind: VisualKind,
    /// Sprite sheet to draw this creature with.
    pub sheet: String,
    #[serde(default)]
    pub level: Option<u8>,
}

impl CreatureSpec {
    pub fn regular(name: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VisualKind::Regular,
            sheet: sheet.into(),
            level: None,
        }
    }

    pub fn boss(name: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VisualKind::Boss,
            sheet: sheet.into(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }
}
