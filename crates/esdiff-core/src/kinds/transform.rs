//! Transforms.
//!
//! Scalar members default to their empty value when absent, so a declared
//! transform that omits `frequency` matches one that sends `""`. Members the
//! shapes do not model, such as `settings.docs_per_second` or
//! `source.runtime_mappings`, land in each level's `extra` map.

use super::{compare_typed, string_or_list, structural_result, TypedDocument};
use crate::diff::DiffResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub source: TransformSource,
    #[serde(default)]
    pub dest: TransformDest,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub sync: TransformSync,
    #[serde(default)]
    pub pivot: TransformPivot,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: TransformSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformSource {
    #[serde(default, deserialize_with = "string_or_list")]
    pub index: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformDest {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub pipeline: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformSync {
    #[serde(default)]
    pub time: TransformTime,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformTime {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub delay: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPivot {
    #[serde(default)]
    pub group_by: Map<String, Value>,
    #[serde(default)]
    pub aggregations: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformSettings {
    #[serde(default)]
    pub max_page_search_size: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for Transform {
    const KIND: &'static str = "transform";

    fn normalize(&mut self) {
        self.id.clear();
        self.version.clear();
        self.create_time = 0;
        self.authorization = None;
    }
}

pub fn diff(old: &str, new: &str) -> DiffResult {
    compare_typed::<Transform, _>("transform_diff", old, new, structural_result::<Transform>)
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARED: &str = r#"{
        "source": {"index": ["kibana_sample_data_ecommerce"], "query": {"term": {"geoip.continent_name": {"value": "Asia"}}}},
        "dest": {"index": "kibana_sample_data_ecommerce_transform1", "pipeline": "add_timestamp_pipeline"},
        "frequency": "5m",
        "sync": {"time": {"field": "order_date", "delay": "60s"}},
        "pivot": {
            "group_by": {"customer_id": {"terms": {"field": "customer_id"}}},
            "aggregations": {"max_price": {"max": {"field": "taxful_total_price"}}}
        },
        "description": "Maximum priced ecommerce data by customer_id in Asia",
        "settings": {"max_page_search_size": 500}
    }"#;

    #[test]
    fn test_server_identity_fields_ignored() {
        let live = DECLARED.replacen(
            "{",
            r#"{"id":"ecommerce_transform1","version":"8.6.0","create_time":1672531200000,"authorization":{"roles":["superuser"]},"#,
            1,
        );
        assert!(is_equivalent(DECLARED, &live));
        assert!(is_equivalent(&live, DECLARED));
    }

    #[test]
    fn test_description_change_detected() {
        let changed = DECLARED.replace("in Asia", "in Europe");
        let result = diff(DECLARED, &changed);
        assert_eq!(result.entries().len(), 1);
        assert_eq!(result.entries()[0].path, "description");
    }

    #[test]
    fn test_source_index_may_be_a_string() {
        let single = DECLARED.replace(
            r#"["kibana_sample_data_ecommerce"]"#,
            r#""kibana_sample_data_ecommerce""#,
        );
        assert!(is_equivalent(DECLARED, &single));
    }

    #[test]
    fn test_unknown_members_participate() {
        let with_retention = DECLARED.replacen(
            "{",
            r#"{"retention_policy":{"time":{"field":"order_date","max_age":"30d"}},"#,
            1,
        );
        assert!(!is_equivalent(DECLARED, &with_retention));
    }

    #[test]
    fn test_unmodelled_nested_members_participate() {
        let throttled = DECLARED.replace(
            r#""max_page_search_size": 500"#,
            r#""max_page_search_size": 500, "docs_per_second": 100"#,
        );
        let slower = throttled.replace("100", "5");
        assert!(is_equivalent(&throttled, &throttled));
        assert!(!is_equivalent(&throttled, &slower));

        let runtime = DECLARED.replace(
            r#""source": {"#,
            r#""source": {"runtime_mappings": {"day": {"type": "keyword"}}, "#,
        );
        assert!(!is_equivalent(DECLARED, &runtime));
        assert!(!is_equivalent(&runtime, DECLARED));

        let aliased = DECLARED.replace(
            r#""pipeline": "add_timestamp_pipeline""#,
            r#""pipeline": "add_timestamp_pipeline", "aliases": [{"alias": "latest"}]"#,
        );
        assert!(!is_equivalent(DECLARED, &aliased));
    }

    #[test]
    fn test_decode_failure_is_not_equivalent() {
        assert!(!is_equivalent(DECLARED, r#"{"create_time":"yesterday"}"#));
    }
}
