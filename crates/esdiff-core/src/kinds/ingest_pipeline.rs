//! Ingest pipelines. Compared by full typed equality; processor order is
//! execution order and therefore significant.

use super::{compare_typed, structural_result, TypedDocument};
use crate::diff::DiffResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestPipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub processors: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for IngestPipeline {
    const KIND: &'static str = "ingest_pipeline";
}

pub fn diff(old: &str, new: &str) -> DiffResult {
    compare_typed::<IngestPipeline, _>(
        "ingest_pipeline_diff",
        old,
        new,
        structural_result::<IngestPipeline>,
    )
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPELINE: &str = r#"{
        "description": "my pipeline",
        "processors": [
            {"set": {"field": "a", "value": "1"}},
            {"lowercase": {"field": "b"}}
        ]
    }"#;

    #[test]
    fn test_key_order_does_not_matter() {
        let reordered = r#"{
            "processors": [
                {"set": {"value": "1", "field": "a"}},
                {"lowercase": {"field": "b"}}
            ],
            "description": "my pipeline"
        }"#;
        assert!(is_equivalent(PIPELINE, reordered));
    }

    #[test]
    fn test_processor_order_matters() {
        let swapped = r#"{
            "description": "my pipeline",
            "processors": [
                {"lowercase": {"field": "b"}},
                {"set": {"field": "a", "value": "1"}}
            ]
        }"#;
        let result = diff(PIPELINE, swapped);
        assert!(!result.is_equivalent());
        assert!(!result.entries().is_empty());
    }

    #[test]
    fn test_explicit_default_is_a_difference() {
        // Typed equality is strict: an added empty member is still a change.
        let with_empty = r#"{"description":"my pipeline","processors":[],"on_failure":[]}"#;
        let without = r#"{"description":"my pipeline","processors":[]}"#;
        let result = diff(with_empty, without);
        assert!(!result.is_equivalent());
        assert_eq!(result.entries()[0].path, "<root>");
    }

    #[test]
    fn test_malformed_side_fails_closed() {
        assert!(!is_equivalent(PIPELINE, "processors"));
        assert!(!is_equivalent(r#"{"processors":{}}"#, PIPELINE));
    }
}
