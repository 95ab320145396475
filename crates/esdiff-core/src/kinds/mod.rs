//! Typed comparators, one per managed kind.
//!
//! Each kind decodes both sides into a known shape, strips the fields the
//! server maintains on its own, and then either compares the typed values
//! directly or hands the normalized remainder to the generic comparator.
//!
//! Every typed shape keeps unmodelled members in a flattened `extra` map so
//! they still take part in the comparison.

pub mod component_template;
pub mod index_template;
pub mod ingest_pipeline;
pub mod license;
pub mod lifecycle_policy;
pub mod resource_metadata;
pub mod snapshot_lifecycle;
pub mod transform;

pub use component_template::ComponentTemplate;
pub use index_template::{IndexSettings, IndexTemplate, TemplateBody};
pub use ingest_pipeline::IngestPipeline;
pub use license::License;
pub use lifecycle_policy::LifecyclePolicy;
pub use transform::Transform;

use crate::core_types::schema::{SIDE_NEW, SIDE_OLD};
use crate::diff::{Comparator, DiffEntry, DiffResult};
use crate::errors::{EsDiffError, ExError};
use crate::json_util::parse_document;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A managed kind with a known JSON shape.
pub trait TypedDocument: Serialize + DeserializeOwned + PartialEq + Sized {
    /// Name used in logs and errors, e.g. `lifecycle_policy`
    const KIND: &'static str;

    /// Strip server-maintained fields. Applied to both sides before comparing.
    fn normalize(&mut self) {}

    /// Decode a raw document; empty input is the empty object.
    ///
    /// # Errors
    ///
    /// `MalformedJson` when the text is not JSON, `ShapeMismatch` when it is
    /// JSON but not this kind.
    fn decode(raw: &str) -> Result<Self, ExError> {
        decode_as::<Self>(raw, "document").map_err(ExError::from)
    }
}

pub(crate) fn decode_as<T: TypedDocument>(raw: &str, side: &str) -> crate::errors::Result<T> {
    let value = parse_document(raw, side)?;
    serde_json::from_value(value).map_err(|e| EsDiffError::ShapeMismatch {
        kind: T::KIND.to_string(),
        side: side.to_string(),
        reason: e.to_string(),
    })
}

/// Decode and normalize both sides, then run `compare`.
///
/// Brackets the call with operation log events. Any failure becomes
/// [`DiffResult::Failed`] and is logged at error level.
pub(crate) fn compare_typed<T, F>(op: &'static str, old: &str, new: &str, compare: F) -> DiffResult
where
    T: TypedDocument,
    F: FnOnce(&T, &T) -> crate::errors::Result<DiffResult>,
{
    log_op_start!(op, kind = T::KIND);
    let start = std::time::Instant::now();

    let outcome = decode_as::<T>(old, SIDE_OLD)
        .and_then(|o| decode_as::<T>(new, SIDE_NEW).map(|n| (o, n)))
        .and_then(|(mut o, mut n)| {
            o.normalize();
            n.normalize();
            compare(&o, &n)
        });
    let elapsed = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(result) => {
            log_op_end!(
                op,
                duration_ms = elapsed,
                kind = T::KIND,
                equivalent = result.is_equivalent()
            );
            result
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = elapsed, kind = T::KIND);
            DiffResult::Failed(
                ExError::from(err)
                    .with_op(op)
                    .with_managed_kind(T::KIND),
            )
        }
    }
}

/// Compare normalized typed values through the generic comparator.
pub(crate) fn generic_result<T: Serialize>(
    comparator: &Comparator,
    old: &T,
    new: &T,
) -> crate::errors::Result<DiffResult> {
    let old = serde_json::to_value(old)?;
    let new = serde_json::to_value(new)?;
    Ok(DiffResult::from_entries(comparator.diff_values(&old, &new)))
}

/// Full typed equality. The entry list is informational; the verdict comes
/// from `PartialEq` alone.
pub(crate) fn structural_result<T: TypedDocument>(
    old: &T,
    new: &T,
) -> crate::errors::Result<DiffResult> {
    if old == new {
        return Ok(DiffResult::Equivalent);
    }
    let old = serde_json::to_value(old)?;
    let new = serde_json::to_value(new)?;
    let mut entries = Comparator::new().diff_values(&old, &new);
    if entries.is_empty() {
        // Only default-valued members differ, which the generic walk forgives.
        entries.push(DiffEntry::modified("<root>", old, new));
    }
    Ok(DiffResult::Different(entries))
}

/// Accept either `"a"` or `["a", "b"]`.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Null(_) => Vec::new(),
    })
}
