//! Keeps overlay entities attached to their owners.
//!
//! Health bars float above the boss and shrink with every collision; glow
//! rings are centered on their creature. An overlay whose owner is gone is
//! despawned.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::creature::BossState;
use crate::components::mapposition::MapPosition;
use crate::components::overlay::{HEALTH_BAR_HEIGHT, Overlay, OverlayOf};
use crate::components::sprite::Sprite;
use crate::systems::resolver::DEFEAT_COUNT;

/// Gap between the top of the boss sprite and its health bar.
const BAR_GAP: f32 = 4.0;

/// Fraction of the health bar still filled after `collision_count` hits.
pub fn health_ratio(collision_count: u32) -> f32 {
    1.0 - (collision_count.min(DEFEAT_COUNT) as f32 / DEFEAT_COUNT as f32)
}

pub fn refresh_overlays(
    owners: Query<(&MapPosition, &Sprite, Option<&BossState>), Without<OverlayOf>>,
    mut overlays: Query<(Entity, &OverlayOf, &mut Overlay, &mut MapPosition)>,
    mut commands: Commands,
) {
    for (entity, owner, mut overlay, mut position) in overlays.iter_mut() {
        let Ok((owner_pos, sprite, boss)) = owners.get(owner.0) else {
            commands.entity(entity).try_despawn();
            continue;
        };
        position.pos = match *overlay {
            Overlay::HealthBarBack | Overlay::HealthBarFill { .. } => Vector2::new(
                owner_pos.pos.x,
                owner_pos.pos.y - sprite.height * 0.5 - BAR_GAP - HEALTH_BAR_HEIGHT * 0.5,
            ),
            Overlay::GlowRing { .. } => owner_pos.pos,
        };
        if let (Overlay::HealthBarFill { ratio }, Some(boss)) = (&mut *overlay, boss) {
            *ratio = health_ratio(boss.collision_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_ratio() {
        assert_eq!(health_ratio(0), 1.0);
        assert_eq!(health_ratio(25), 0.5);
        assert_eq!(health_ratio(50), 0.0);
        assert_eq!(health_ratio(80), 0.0);
    }

    #[test]
    fn test_overlays_follow_owner_and_orphans_vanish() {
        let mut world = World::new();
        let boss = world
            .spawn((
                MapPosition::new(300.0, 104.0),
                Sprite::new("Evil Whale", 128.0, 1.5),
                BossState {
                    collision_count: 10,
                    ..Default::default()
                },
            ))
            .id();
        let fill = world
            .spawn((
                Overlay::HealthBarFill { ratio: 1.0 },
                OverlayOf(boss),
                MapPosition::new(0.0, 0.0),
            ))
            .id();
        let ghost = world.spawn_empty().id();
        let orphan = world
            .spawn((
                Overlay::GlowRing { tier: 1, ring: 0 },
                OverlayOf(ghost),
                MapPosition::new(0.0, 0.0),
            ))
            .id();
        world.despawn(ghost);

        let mut schedule = Schedule::default();
        schedule.add_systems(refresh_overlays);
        schedule.run(&mut world);

        let pos = world.get::<MapPosition>(fill).unwrap().pos;
        assert_eq!(pos.x, 300.0);
        assert_eq!(pos.y, 104.0 - 96.0 - 4.0 - 5.0);
        assert_eq!(
            *world.get::<Overlay>(fill).unwrap(),
            Overlay::HealthBarFill { ratio: 0.8 }
        );
        assert!(world.get_entity(orphan).is_err());
    }
}
