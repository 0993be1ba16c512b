//! Delay queue systems.
//!
//! This module drives [`Delay`](crate::components::delay::Delay) components:
//!
//! - [`delay_tick_system`] – per-frame pass that fires due callbacks
//! - [`delay_pause_observer`] – stamps pause start on every queue
//! - [`delay_unpause_observer`] – shifts due times by the paused duration
//! - [`DelayExt`] – `delay` / `cancel_delay` on [`EntityWorldMut`]
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `delay_tick_system` samples the [`Clock`] once
//! 2. For every entity with a `Delay`, slots are walked from last to first:
//!    - tombstones left by cancellation are removed
//!    - due entries call their callback with `(world, entity)`
//!    - repeating entries are rescheduled from `now`, the others removed and
//!      their completion callback called
//!
//! # Example Setup
//!
//! ```ignore
//! register_delay_observers(&mut world);
//! schedule.add_systems(delay_tick_system.run_if(game_not_paused));
//! ```
//!
//! # Related
//!
//! - [`crate::systems::gamepause`] – pause transitions and run condition
//! - [`crate::events::pause`] – the events observed here

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::delay::{Delay, DelayCallback, Repeat, SlotPoll};
use crate::events::pause::{PauseEvent, UnpauseEvent};
use crate::resources::clock::Clock;

/// Register the pause/unpause observers that keep delay queues in sync with
/// the game clock.
pub fn register_delay_observers(world: &mut World) {
    world.add_observer(delay_pause_observer);
    world.add_observer(delay_unpause_observer);
    world.flush();
}

/// Fire every due delay entry in the world.
///
/// Exclusive system: callbacks get full `&mut World` access. The time is
/// sampled once, so every entity sees the same `now` during a frame.
pub fn delay_tick_system(world: &mut World) {
    let now = Clock::sample(world.get_resource::<Clock>());
    let mut query = world.query_filtered::<Entity, With<Delay>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    for entity in entities {
        tick_entity(world, entity, now);
    }
}

fn tick_entity(world: &mut World, entity: Entity, now: u64) {
    let Some(mut index) = world.get::<Delay>(entity).map(Delay::slot_count) else {
        return;
    };
    while index > 0 {
        index -= 1;
        let poll = match world.get_mut::<Delay>(entity) {
            Some(mut delay) => delay.poll(index, now),
            None => return,
        };
        let SlotPoll::Due(callback) = poll else {
            continue;
        };

        trace!("Firing {:?} on {:?} at {}", callback, entity, now);
        callback.call(world, entity);

        // The callback may have despawned the entity or dropped its queue.
        let completion = match world.get_mut::<Delay>(entity) {
            Some(mut delay) => delay.finish(index, now),
            None => {
                debug!("Delay queue of {:?} went away during its tick", entity);
                return;
            }
        };
        if let Some(on_complete) = completion {
            debug!("Delay {:?} on {:?} completed", callback, entity);
            on_complete.call(world, entity);
        }
    }
}

/// Observer that freezes every delay queue when the game pauses.
pub fn delay_pause_observer(
    _trigger: On<PauseEvent>,
    clock: Option<Res<Clock>>,
    mut query: Query<&mut Delay>,
) {
    let now = Clock::sample(clock.as_deref());
    debug!("Pausing delay queues at {}", now);
    for mut delay in query.iter_mut() {
        delay.pause(now);
    }
}

/// Observer that resumes every delay queue, pushing due times back by the
/// time spent paused.
pub fn delay_unpause_observer(
    _trigger: On<UnpauseEvent>,
    clock: Option<Res<Clock>>,
    mut query: Query<&mut Delay>,
) {
    let now = Clock::sample(clock.as_deref());
    debug!("Resuming delay queues at {}", now);
    for mut delay in query.iter_mut() {
        delay.unpause(now);
    }
}

/// Delay scheduling on entities.
///
/// The first call to [`DelayExt::delay`] inserts a [`Delay`] component. Both
/// methods return the entity for chaining.
pub trait DelayExt {
    /// Run `callback` after `delay_ms`, `repeat` more times, then `on_complete`.
    fn delay(
        &mut self,
        callback: DelayCallback,
        delay_ms: u64,
        repeat: impl Into<Repeat>,
        on_complete: Option<DelayCallback>,
    ) -> &mut Self;

    /// Cancel every pending delay scheduled with `callback`.
    fn cancel_delay(&mut self, callback: &DelayCallback) -> &mut Self;
}

impl DelayExt for EntityWorldMut<'_> {
    fn delay(
        &mut self,
        callback: DelayCallback,
        delay_ms: u64,
        repeat: impl Into<Repeat>,
        on_complete: Option<DelayCallback>,
    ) -> &mut Self {
        let now = Clock::sample(self.world().get_resource::<Clock>());
        if !self.contains::<Delay>() {
            self.insert(Delay::new());
        }
        if let Some(mut delay) = self.get_mut::<Delay>() {
            delay.schedule(now, callback, delay_ms, repeat, on_complete);
        }
        self
    }

    fn cancel_delay(&mut self, callback: &DelayCallback) -> &mut Self {
        if let Some(mut delay) = self.get_mut::<Delay>() {
            delay.cancel(callback);
        }
        self
    }
}
