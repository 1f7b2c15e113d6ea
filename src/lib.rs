//! Taskmaster: a personal task tracker engine.
//!
//! This crate owns the authoritative task collection, validates and applies
//! create, edit, toggle, and delete intents against it, persists every
//! committed change through a key-value snapshot port, and derives filtered,
//! searched, and sorted views plus summary counts from it.
//!
//! # Architecture
//!
//! Taskmaster follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task model with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (memory, filesystem)
//! - **View**: Pure derivations taking the current instant as a parameter
//!
//! # Modules
//!
//! - [`task`]: Task model, lifecycle, persistence, and views
//! - [`config`]: Tracker configuration

pub mod config;
pub mod task;
