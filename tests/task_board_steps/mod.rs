//! Step definitions for task board behaviour scenarios.

pub mod given;
pub mod when;
pub mod world;
