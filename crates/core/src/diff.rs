//! Shared diff-status enum used by the version comparison engine and the
//! fork-time change log.
//!
//! Provides a canonical set of diff states for ingredient, instruction,
//! and general-field comparisons between recipe versions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The status of an item in a version comparison.
///
/// - `Added`     -- present only in the modified (newer) snapshot.
/// - `Removed`   -- present only in the original snapshot.
/// - `Modified`  -- present in both snapshots with different content.
/// - `Unchanged` -- present in both snapshots with identical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl DiffStatus {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
        }
    }

    /// Parse a diff status from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "added" => Ok(Self::Added),
            "removed" => Ok(Self::Removed),
            "modified" => Ok(Self::Modified),
            "unchanged" => Ok(Self::Unchanged),
            _ => Err(CoreError::Validation(format!(
                "Invalid change type '{s}'. Must be one of: added, removed, modified, unchanged"
            ))),
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
