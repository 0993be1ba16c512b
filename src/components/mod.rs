//! ECS components for entities.
//!
//! Submodules overview:
//! - [`delay`] – per-entity queue of delayed, optionally repeating callbacks

pub mod delay;
