//! Engine systems.
//!
//! Submodules overview
//! - [`delay`] – fire due delayed callbacks, follow pause/unpause
//! - [`gamepause`] – pause transitions and the `game_not_paused` run condition

pub mod delay;
pub mod gamepause;
