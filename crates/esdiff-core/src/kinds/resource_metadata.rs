//! Security resources: free-form `metadata` members of roles, role mappings
//! and users, and whole role bodies as the security API returns them.

use crate::diff::{Comparator, DiffResult, ExclusionSet, FieldSchema};

/// Keys the server adds under `metadata` for built-in and deprecated objects.
pub const RESERVED_METADATA_KEYS: [&str; 3] = ["_reserved", "_deprecated", "_deprecated_reason"];

/// Exclusions for a bare `metadata` object.
pub fn metadata_exclusions() -> ExclusionSet {
    RESERVED_METADATA_KEYS.into_iter().collect()
}

/// Exclusions for a whole role body.
pub fn document_exclusions() -> ExclusionSet {
    let mut set = ExclusionSet::new().with("transient_metadata");
    for key in RESERVED_METADATA_KEYS {
        set = set.with(&format!("metadata.{}", key));
    }
    set
}

/// Privilege and name lists that Elasticsearch treats as sets.
pub fn role_schema() -> FieldSchema {
    FieldSchema::new()
        .unordered("cluster")
        .unordered("run_as")
        .unordered("indices.*.names")
        .unordered("indices.*.privileges")
        .unordered("applications.*.privileges")
        .unordered("applications.*.resources")
}

pub fn diff_metadata(old: &str, new: &str) -> DiffResult {
    Comparator::new()
        .with_exclusions(metadata_exclusions())
        .diff_str(old, new)
}

pub fn metadata_equivalent(old: &str, new: &str) -> bool {
    diff_metadata(old, new).is_equivalent()
}

/// Compare two full role documents.
pub fn diff_role(old: &str, new: &str) -> DiffResult {
    Comparator::new()
        .with_exclusions(document_exclusions())
        .with_schema(role_schema())
        .diff_str(old, new)
}

pub fn role_equivalent(old: &str, new: &str) -> bool {
    diff_role(old, new).is_equivalent()
}
