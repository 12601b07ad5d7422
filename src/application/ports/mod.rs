//! Application ports (hexagonal architecture boundaries)
//!
//! Repository ports live in `domain`. Ports for the outside world that
//! drives the application live here.

pub mod input;

pub use input::InputReader;
