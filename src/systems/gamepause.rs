//! Game clock pause transitions.
//!
//! [`set_paused`] and [`toggle_pause`] flip the
//! [`GamePause`](crate::resources::gamepause::GamePause) resource and trigger
//! [`PauseEvent`] / [`UnpauseEvent`] only when the state actually changes, so
//! observers never see two pauses in a row. [`game_not_paused`] is the run
//! condition for per-frame systems that must stop while paused.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::pause::{PauseEvent, UnpauseEvent};
use crate::resources::gamepause::GamePause;

/// Pause or resume the game clock.
///
/// Returns `true` if the state changed (and an event was triggered).
pub fn set_paused(world: &mut World, paused: bool) -> bool {
    {
        let mut state = world.get_resource_or_insert_with(GamePause::new);
        if state.is_paused() == paused {
            return false;
        }
        state.set(paused);
    }
    if paused {
        info!("Game paused");
        world.trigger(PauseEvent {});
    } else {
        info!("Game resumed");
        world.trigger(UnpauseEvent {});
    }
    true
}

/// Flip the pause state. Returns the new state.
pub fn toggle_pause(world: &mut World) -> bool {
    let paused = !is_paused(world);
    set_paused(world, paused);
    paused
}

pub fn is_paused(world: &World) -> bool {
    world
        .get_resource::<GamePause>()
        .is_some_and(GamePause::is_paused)
}

/// Run condition: `true` while the game clock is running.
pub fn game_not_paused(pause: Option<Res<GamePause>>) -> bool {
    pause.is_none_or(|p| !p.is_paused())
}
