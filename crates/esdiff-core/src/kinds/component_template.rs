//! Component templates.

use super::index_template::{template_schema, TemplateBody};
use super::{compare_typed, generic_result, TypedDocument};
use crate::diff::{Comparator, DiffResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    #[serde(default)]
    pub template: TemplateBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for ComponentTemplate {
    const KIND: &'static str = "component_template";

    fn normalize(&mut self) {
        self.template.normalize();
    }
}

/// Compare two component template documents.
pub fn diff(old: &str, new: &str) -> DiffResult {
    let comparator = Comparator::new().with_schema(template_schema());
    compare_typed::<ComponentTemplate, _>("component_template_diff", old, new, |a, b| {
        generic_result(&comparator, a, b)
    })
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}
