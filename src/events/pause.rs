//! Game clock pause/unpause events.
//!
//! [`PauseEvent`] is triggered when the game clock freezes and
//! [`UnpauseEvent`] when it resumes. Both carry no data: observers sample the
//! current time from the [`Clock`](crate::resources::clock::Clock) resource.
//!
//! Use [`set_paused`](crate::systems::gamepause::set_paused) or
//! [`toggle_pause`](crate::systems::gamepause::toggle_pause) rather than
//! triggering these directly, so they only fire on real transitions.
//!
//! # Related
//!
//! - [`crate::systems::delay::delay_pause_observer`] – freezes delay queues
//! - [`crate::systems::delay::delay_unpause_observer`] – resumes delay queues

use bevy_ecs::prelude::*;

/// Event emitted when the game clock freezes.
#[derive(Event, Debug, Clone, Copy)]
pub struct PauseEvent {}

/// Event emitted when the game clock resumes.
#[derive(Event, Debug, Clone, Copy)]
pub struct UnpauseEvent {}
