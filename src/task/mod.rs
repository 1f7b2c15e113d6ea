//! Task tracking for taskmaster.
//!
//! The module owns the task collection, the operations that mutate it, and
//! the pure derivations that turn it into a display list and summary counts.
//! It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - View projection and statistics in [`view`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view;
