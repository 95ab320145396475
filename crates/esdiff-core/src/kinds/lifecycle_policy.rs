//! Index lifecycle (ILM) policies.
//!
//! The stored document is the body of a get-lifecycle response:
//! `{"version":1,"modified_date":"..","policy":{"phases":{..}}}`.

use super::{compare_typed, generic_result, TypedDocument};
use crate::diff::{Comparator, DiffResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Age the server reports for a phase that was declared without one.
const DEFAULT_MIN_AGE: &str = "0ms";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_use_by: Option<Value>,
    #[serde(default)]
    pub policy: PolicyBody,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyBody {
    #[serde(default)]
    pub phases: BTreeMap<String, Phase>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<String>,
    #[serde(default)]
    pub actions: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for LifecyclePolicy {
    const KIND: &'static str = "lifecycle_policy";

    fn normalize(&mut self) {
        self.version = None;
        self.modified_date = None;
        self.in_use_by = None;
        for phase in self.policy.phases.values_mut() {
            if phase.min_age.as_deref() == Some(DEFAULT_MIN_AGE) {
                phase.min_age = None;
            }
        }
    }
}

/// Compare two ILM policy documents.
pub fn diff(old: &str, new: &str) -> DiffResult {
    compare_typed::<LifecyclePolicy, _>("lifecycle_policy_diff", old, new, |a, b| {
        generic_result(&Comparator::new(), a, b)
    })
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}
