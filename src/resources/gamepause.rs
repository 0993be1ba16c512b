//! Global pause state of the game clock.
//!
//! The [`GamePause`] resource records whether the game is paused. It is
//! flipped by [`set_paused`](crate::systems::gamepause::set_paused), which
//! also triggers the [`PauseEvent`](crate::events::pause::PauseEvent) /
//! [`UnpauseEvent`](crate::events::pause::UnpauseEvent) pair, and read by the
//! [`game_not_paused`](crate::systems::gamepause::game_not_paused) run
//! condition that stops frame ticks while paused.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamePause {
    paused: bool,
}

impl GamePause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Update the flag without triggering events.
    ///
    /// Prefer [`set_paused`](crate::systems::gamepause::set_paused) so delay
    /// queues see the transition.
    pub fn set(&mut self, paused: bool) {
        self.paused = paused;
    }
}
