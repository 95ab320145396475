//! Composable index templates and the template body they share with
//! component templates.

use super::{compare_typed, generic_result, string_or_list, TypedDocument};
use crate::diff::{Comparator, DiffResult, FieldSchema};
use crate::json_util::flatten_object;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const INDEX_PREFIX: &str = "index.";

/// Index settings as a flat map of dotted keys.
///
/// The API accepts `{"index":{"refresh_interval":"5s"}}`,
/// `{"index.refresh_interval":"5s"}` and `{"refresh_interval":"5s"}` for the
/// same setting and answers with the fully qualified flat form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSettings(pub Map<String, Value>);

impl IndexSettings {
    pub fn normalize(&mut self) {
        self.0 = flatten_object(&self.0)
            .into_iter()
            .map(|(key, value)| {
                if key.starts_with(INDEX_PREFIX) {
                    (key, value)
                } else {
                    (format!("{}{}", INDEX_PREFIX, key), value)
                }
            })
            .collect();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// The `template` member of index and component templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<IndexSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateBody {
    pub fn normalize(&mut self) {
        if let Some(settings) = self.settings.as_mut() {
            settings.normalize();
        }
    }
}

/// Field annotations shared by both template kinds.
pub(crate) fn template_schema() -> FieldSchema {
    FieldSchema::new().coerce_scalars("template.settings")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexTemplate {
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub index_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateBody>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_stream: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_auto_create: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for IndexTemplate {
    const KIND: &'static str = "index_template";

    fn normalize(&mut self) {
        if let Some(body) = self.template.as_mut() {
            body.normalize();
        }
    }
}

fn comparator() -> Comparator {
    Comparator::new().with_schema(template_schema().unordered("index_patterns"))
}

/// Compare two composable index template documents.
pub fn diff(old: &str, new: &str) -> DiffResult {
    compare_typed::<IndexTemplate, _>("index_template_diff", old, new, |a, b| {
        generic_result(&comparator(), a, b)
    })
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "index_patterns": ["test-index-template"],
        "template": {
            "settings": {
                "index.refresh_interval": "5s",
                "index.lifecycle.name": "policy-logstash-backup",
                "index.lifecycle.rollover_alias": "logstash-backup-alias"
            }
        },
        "priority": 2
    }"#;

    #[test]
    fn test_settings_forms_are_equivalent() {
        let nested = r#"{"index_patterns":["test-index-template"],"priority":2,"template":{"settings":{
            "index":{"refresh_interval":"5s","lifecycle":{"name":"policy-logstash-backup","rollover_alias":"logstash-backup-alias"}}
        }}}"#;
        let unprefixed = r#"{"index_patterns":"test-index-template","priority":2,"template":{"settings":{
            "refresh_interval":"5s","lifecycle.name":"policy-logstash-backup","lifecycle.rollover_alias":"logstash-backup-alias"
        }}}"#;
        assert!(is_equivalent(TEMPLATE, nested));
        assert!(is_equivalent(TEMPLATE, unprefixed));
    }

    #[test]
    fn test_setting_change_is_detected() {
        let updated = TEMPLATE.replace("5s", "3s");
        let result = diff(TEMPLATE, &updated);
        assert_eq!(result.entries().len(), 1);
        assert_eq!(
            result.entries()[0].path,
            "template.settings.index.refresh_interval"
        );
    }

    #[test]
    fn test_settings_values_are_coerced() {
        let declared = r#"{"index_patterns":["a"],"template":{"settings":{"number_of_shards":1,"hidden":true}}}"#;
        let live = r#"{"index_patterns":["a"],"template":{"settings":{"index":{"number_of_shards":"1","hidden":"true"}}}}"#;
        assert!(is_equivalent(declared, live));
    }

    #[test]
    fn test_priority_is_not_coerced() {
        assert!(!is_equivalent(
            r#"{"index_patterns":["a"],"priority":2}"#,
            r#"{"index_patterns":["a"],"priority":"2"}"#
        ));
    }

    #[test]
    fn test_index_patterns_are_unordered() {
        assert!(is_equivalent(
            r#"{"index_patterns":["a","b"]}"#,
            r#"{"index_patterns":["b","a"]}"#
        ));
    }

    #[test]
    fn test_composed_of_is_ordered() {
        assert!(!is_equivalent(
            r#"{"index_patterns":["a"],"composed_of":["x","y"]}"#,
            r#"{"index_patterns":["a"],"composed_of":["y","x"]}"#
        ));
    }

    #[test]
    fn test_unknown_members_still_compare() {
        assert!(!is_equivalent(
            r#"{"index_patterns":["a"],"ignore_missing_component_templates":["x"]}"#,
            r#"{"index_patterns":["a"]}"#
        ));
    }

    #[test]
    fn test_settings_normalize_prefixes_and_flattens() {
        let mut settings: IndexSettings =
            serde_json::from_str(r#"{"index":{"codec":"best_compression"},"number_of_replicas":0}"#)
                .unwrap();
        settings.normalize();
        assert!(settings.get("index.codec").is_some());
        assert!(settings.get("index.number_of_replicas").is_some());
        assert!(settings.get("index").is_none());
    }
}
