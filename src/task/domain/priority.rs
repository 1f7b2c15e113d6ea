//! Task priority levels and their ranking.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
///
/// Variants are declared in ascending rank, so the derived [`Ord`] gives
/// `Urgent > High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal work.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Needs attention first.
    Urgent,
}

impl Priority {
    /// All priorities from highest to lowest rank.
    pub const DESCENDING: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TaskDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
