//! esdiff core - semantic JSON equivalence for Elasticsearch objects
//!
//! This crate decides whether a declared document and the document the
//! cluster reports back describe the same object, including:
//! - A generic structural comparator with exclusion paths and field schemas
//! - Typed comparators for lifecycle policies, templates, pipelines,
//!   transforms, licenses and security resources
//! - The error and logging facilities shared with `esdiff-engine`

pub use esdiff_core_types as core_types;

pub mod diff;
pub mod errors;
pub mod json_util;
pub mod kinds;
pub mod logging_facility;
pub mod path;

// Re-export commonly used types
pub use diff::{compare_equivalent, Comparator, DiffEntry, DiffResult, ExclusionSet, FieldSchema};
pub use errors::{EsDiffError, ExError, ExErrorKind, Result};
pub use kinds::TypedDocument;
pub use path::{FieldPath, PathPattern};
