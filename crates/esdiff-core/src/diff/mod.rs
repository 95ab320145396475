//! Generic JSON comparator.
//!
//! Decides whether two JSON documents describing the same Elasticsearch
//! object are semantically equivalent, and reports where they are not.
//!
//! ## Entry point
//!
//! ```ignore
//! use esdiff_core::diff::{compare_equivalent, ExclusionSet};
//!
//! let exclusions: ExclusionSet = ["ignore_unavailable"].into_iter().collect();
//! assert!(compare_equivalent(old, new, &exclusions));
//! ```
//!
//! ## Guarantees
//!
//! - **Key order**: object member order never affects the verdict.
//! - **Defaults**: a member holding `null`, `""`, `0`, `false`, `[]` or `{}`
//!   matches the member being absent.
//! - **Fail closed**: malformed input is reported as [`DiffResult::Failed`]
//!   and is never equivalent.
//! - **Determinism**: entries come out in sorted key order.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod rules;

pub use engine::{compare_equivalent, diff_json, Comparator};
pub use human_summary::render_diff_summary;
pub use model::{Change, DiffEntry, DiffResult};
pub use rules::{ExclusionSet, FieldRule, FieldSchema};
