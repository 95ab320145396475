//! Cluster license.
//!
//! Two licenses are the same when they identify the same grant: `uid`,
//! `type`, `expiry_date_in_millis` and `max_nodes`. Status and issuance
//! details drift on the server without the license changing.

use super::{compare_typed, TypedDocument};
use crate::diff::{DiffEntry, DiffResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date_in_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Present when the document is a get-license response wrapper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Box<License>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedDocument for License {
    const KIND: &'static str = "license";

    fn normalize(&mut self) {
        if let Some(inner) = self.license.take() {
            *self = *inner;
            self.normalize();
        }
    }
}

fn identity_entries(old: &License, new: &License) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    let mut check = |path: &str, a: Value, b: Value| {
        if a != b {
            entries.push(DiffEntry::modified(path, a, b));
        }
    };
    check("uid", old.uid.clone().into(), new.uid.clone().into());
    check(
        "type",
        old.license_type.clone().into(),
        new.license_type.clone().into(),
    );
    check(
        "expiry_date_in_millis",
        old.expiry_date_in_millis.into(),
        new.expiry_date_in_millis.into(),
    );
    check("max_nodes", old.max_nodes.into(), new.max_nodes.into());
    entries
}

pub fn diff(old: &str, new: &str) -> DiffResult {
    compare_typed::<License, _>("license_diff", old, new, |a, b| {
        Ok(DiffResult::from_entries(identity_entries(a, b)))
    })
}

pub fn is_equivalent(old: &str, new: &str) -> bool {
    diff(old, new).is_equivalent()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LICENSE: &str = r#"{
        "uid": "893361dc-9749-4997-93cb-802e3d7fa4xx",
        "type": "platinum",
        "issue_date_in_millis": 1411948800000,
        "expiry_date_in_millis": 1914278399999,
        "max_nodes": 1,
        "issued_to": "issuedTo",
        "issuer": "issuer",
        "signature": "xx"
    }"#;

    #[test]
    fn test_wrapper_and_flat_forms_match() {
        let wrapped = format!(r#"{{"license":{}}}"#, LICENSE);
        assert!(is_equivalent(LICENSE, &wrapped));
    }

    #[test]
    fn test_status_and_signature_ignored() {
        let live = r#"{"license":{
            "status": "active",
            "uid": "893361dc-9749-4997-93cb-802e3d7fa4xx",
            "type": "platinum",
            "expiry_date_in_millis": 1914278399999,
            "max_nodes": 1,
            "issued_to": "someone else"
        }}"#;
        assert!(is_equivalent(LICENSE, live));
    }

    #[test]
    fn test_identity_change_detected() {
        let changed = LICENSE.replace("platinum", "basic").replace("\"max_nodes\": 1", "\"max_nodes\": 5");
        let paths: Vec<String> = diff(LICENSE, &changed)
            .entries()
            .iter()
            .map(|e| e.path.clone())
            .collect();
        assert_eq!(paths, vec!["type", "max_nodes"]);
    }

    #[test]
    fn test_unlimited_nodes_is_null() {
        assert!(is_equivalent(
            r#"{"uid":"u","type":"enterprise","max_nodes":null}"#,
            r#"{"uid":"u","type":"enterprise"}"#
        ));
    }
}
