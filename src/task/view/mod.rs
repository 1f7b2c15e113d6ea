//! Pure derivations over the task collection.
//!
//! Nothing here mutates state or reads a clock: callers pass the collection,
//! their selection, and `now`, and recompute whenever any of them changes.

mod filter;
mod projection;
mod search;
mod stats;

pub use filter::{TaskFilter, URGENT_WINDOW};
pub use projection::{ViewSelection, display_order, project};
pub use search::SearchQuery;
pub use stats::TaskStats;
