//! Case-insensitive text search over task titles and descriptions.

use crate::task::domain::Task;

/// Normalized search text.
///
/// The query is lower-cased once and otherwise kept verbatim, so surrounding
/// whitespace takes part in matching. Only an empty query matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Normalizes raw search input.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Returns whether the query is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns whether the title or the description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.is_blank()
            || self.matches_field(task.title().as_str())
            || self.matches_field(task.description())
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

impl From<&str> for SearchQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}
