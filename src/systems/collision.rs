//! Collision detector.
//!
//! Runs once per frame after movement. With a boss on screen only pairs
//! involving the boss are tested; otherwise every unordered pair of
//! creatures is. A pair is skipped while in cooldown. An overlapping pair
//! rolls to trigger (80% with the boss, 30% between creatures); a triggered
//! pair is stamped and handed to the resolver through a [`CollisionEvent`].
//!
//! A creature takes part in at most one triggered collision per frame.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{BossState, Creature};
use crate::components::drag::Draggable;
use crate::components::mapposition::MapPosition;
use crate::components::tween::TweenPosition;
use crate::events::collision::CollisionEvent;
use crate::resources::cooldown::CollisionCooldowns;
use crate::resources::registry::EntityRegistry;
use crate::resources::rng::SceneRng;
use crate::resources::worldtime::WorldTime;

/// Trigger probability of an overlap involving the boss.
pub const BOSS_TRIGGER_CHANCE: f32 = 0.8;
/// Trigger probability of an overlap between two regular creatures.
pub const CREATURE_TRIGGER_CHANCE: f32 = 0.3;

#[derive(Clone, Copy)]
struct Candidate<'a> {
    entity: Entity,
    name: &'a str,
    pos: raylib::prelude::Vector2,
    collider: &'a BoxCollider,
}

#[allow(clippy::type_complexity)]
pub fn collision_detector(
    time: Res<WorldTime>,
    registry: Res<EntityRegistry>,
    mut cooldowns: ResMut<CollisionCooldowns>,
    mut rng: ResMut<SceneRng>,
    query: Query<
        (
            Entity,
            &Creature,
            &MapPosition,
            &BoxCollider,
            Option<&Draggable>,
            Option<&BossState>,
        ),
        Without<TweenPosition>,
    >,
    mut commands: Commands,
) {
    let now = time.elapsed;
    let candidates: Vec<Candidate> = query
        .iter()
        .filter(|(_, _, _, _, drag, boss)| {
            !drag.is_some_and(Draggable::is_dragging) && !boss.is_some_and(|b| b.defeated)
        })
        .map(|(entity, creature, position, collider, _, _)| Candidate {
            entity,
            name: creature.name.as_str(),
            pos: position.pos,
            collider,
        })
        .collect();

    let mut pairs: Vec<(Candidate, Candidate)> = Vec::new();
    match registry.boss() {
        Some(boss_entity) => {
            let Some(boss) = candidates.iter().find(|c| c.entity == boss_entity) else {
                return;
            };
            pairs.extend(
                candidates
                    .iter()
                    .filter(|c| c.entity != boss_entity)
                    .map(|other| (*boss, *other)),
            );
        }
        None => {
            for (i, a) in candidates.iter().enumerate() {
                for b in &candidates[i + 1..] {
                    pairs.push((*a, *b));
                }
            }
        }
    }

    let chance = if registry.has_boss() {
        BOSS_TRIGGER_CHANCE
    } else {
        CREATURE_TRIGGER_CHANCE
    };
    let mut engaged: SmallVec<[Entity; 8]> = SmallVec::new();
    for (a, b) in pairs {
        if engaged.contains(&a.entity) || engaged.contains(&b.entity) {
            continue;
        }
        if cooldowns.is_cooling(a.name, b.name, now) {
            continue;
        }
        if !a.collider.overlaps(a.pos, b.collider, b.pos) {
            continue;
        }
        if !rng.chance(chance) {
            continue;
        }
        log::debug!("Collision between '{}' and '{}'", a.name, b.name);
        cooldowns.stamp(a.name, b.name, now);
        engaged.push(a.entity);
        engaged.push(b.entity);
        commands.trigger(CollisionEvent {
            a: a.entity,
            b: b.entity,
        });
    }
}
