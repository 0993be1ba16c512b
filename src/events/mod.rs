//! Event types exchanged between the host loop and the delay systems.
//!
//! Submodules:
//! - [`pause`] – game clock freeze/resume notifications
pub mod pause;
