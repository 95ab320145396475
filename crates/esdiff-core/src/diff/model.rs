//! Comparison output types.
//!
//! `DiffEntry` and `Change` serialize so a caller can attach the detail to a
//! plan diagnostic. Entries are produced in a deterministic order (object keys
//! sorted, array indices ascending).

use crate::errors::ExError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened at one path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    /// Present only in the new document, with a non-default value
    Added { new: Value },
    /// Present only in the old document, with a non-default value
    Removed { old: Value },
    /// Present in both with values that do not match
    Modified { old: Value, new: Value },
}

/// One unresolved mismatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    /// Rendered [`FieldPath`](crate::path::FieldPath), e.g. `policy.phases.delete.min_age`
    pub path: String,
    pub change: Change,
}

impl DiffEntry {
    pub fn added(path: impl Into<String>, new: Value) -> Self {
        Self {
            path: path.into(),
            change: Change::Added { new },
        }
    }

    pub fn removed(path: impl Into<String>, old: Value) -> Self {
        Self {
            path: path.into(),
            change: Change::Removed { old },
        }
    }

    pub fn modified(path: impl Into<String>, old: Value, new: Value) -> Self {
        Self {
            path: path.into(),
            change: Change::Modified { old, new },
        }
    }
}

/// Ternary comparison outcome.
///
/// Callers that only need the suppression signal use [`DiffResult::is_equivalent`];
/// `Failed` always maps to `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffResult {
    Equivalent,
    Different(Vec<DiffEntry>),
    Failed(ExError),
}

impl DiffResult {
    pub fn from_entries(entries: Vec<DiffEntry>) -> Self {
        if entries.is_empty() {
            DiffResult::Equivalent
        } else {
            DiffResult::Different(entries)
        }
    }

    pub fn is_equivalent(&self) -> bool {
        matches!(self, DiffResult::Equivalent)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DiffResult::Failed(_))
    }

    pub fn entries(&self) -> &[DiffEntry] {
        match self {
            DiffResult::Different(entries) => entries,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ExError> {
        match self {
            DiffResult::Failed(err) => Some(err),
            _ => None,
        }
    }
}
