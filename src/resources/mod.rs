//! ECS resources made available to systems.
//!
//! Overview
//! - `clock` – millisecond time source sampled by the delay systems
//! - `democonfig` – INI-backed settings of the demo frame loop
//! - `gamepause` – whether the game clock is currently frozen
pub mod clock;
pub mod democonfig;
pub mod gamepause;
