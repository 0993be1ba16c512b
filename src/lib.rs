//! gamedelay library.
//!
//! Per-entity delayed callbacks for `bevy_ecs` worlds: entities schedule
//! callbacks to run after an elapsed time, optionally repeating, cancel them
//! by reference, and have their timers frozen while the game is paused.
//!
//! - [`components`] – the [`Delay`](components::delay::Delay) queue component
//! - [`events`] – pause/unpause events
//! - [`resources`] – clock, pause state and demo configuration
//! - [`systems`] – tick system, pause observers, pause transitions
//! - [`game`] – demo scene and frame loop used by the binary

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
