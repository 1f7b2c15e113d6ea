//! Adapter implementations for the task snapshot port.

pub mod fs;
pub mod memory;
