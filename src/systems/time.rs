//! Time and timer systems.
//!
//! - [`update_world_time`] advances the shared [`WorldTime`] once per frame.
//! - [`update_timers`] counts down [`Timer`] components and triggers a
//!   [`TimerEvent`] when one expires.
//! - [`on_timer`] carries out the boss choreography the timers encode.
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::behavior::Behavior;
use crate::components::creature::{BossState, Creature};
use crate::components::timer::{Timer, TimerAction};
use crate::events::lifecycle::RemoveCreatureEvent;
use crate::events::timer::TimerEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::play_state;

/// Delay between the flourish's `attack` beat and the boss re-roll.
pub const FLOURISH_REROLL_DELAY: f32 = 2.0;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the frame delta in seconds; negative deltas count as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let dt = dt.max(0.0);
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.delta = dt;
}

/// Advance every [`Timer`]; expired timers are removed and reported.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.elapsed += world_time.delta;
        if timer.finished() {
            commands.entity(entity).try_remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                action: timer.action,
            });
        }
    }
}

/// Observer for [`TimerEvent`]. Stale entities are ignored.
pub fn on_timer(
    trigger: On<TimerEvent>,
    mut bosses: Query<(&Creature, &mut BossState, &mut Animation, &mut Behavior)>,
    store: Res<AnimationStore>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((creature, mut boss, mut anim, mut behavior)) = bosses.get_mut(event.entity) else {
        return;
    };

    match event.action {
        TimerAction::BossAttack => {
            if boss.defeated {
                return;
            }
            play_state(&mut anim, "attack", &store);
            commands
                .entity(event.entity)
                .try_insert(Timer::new(FLOURISH_REROLL_DELAY, TimerAction::BossReroll));
        }
        TimerAction::BossReroll => {
            if boss.defeated {
                return;
            }
            boss.scripted = false;
            behavior.expire();
            log::debug!("Boss '{}' flourish over", creature.name);
        }
        TimerAction::RemoveBoss => {
            log::info!("Boss '{}' leaves the scene", creature.name);
            commands.trigger(RemoveCreatureEvent {
                name: creature.name.clone(),
            });
        }
    }
}
