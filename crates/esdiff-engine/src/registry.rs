//! Diff-suppression registry.
//!
//! `suppress` is the single entry point the resource layer calls when a
//! planned value differs textually from refreshed state. It looks up the
//! comparator registered for the resource field and returns `true` when the
//! two documents are semantically the same.

use crate::context::ProviderContext;
use esdiff_core::diff::{compare_equivalent, render_diff_summary, DiffResult, ExclusionSet};
use esdiff_core::errors::{EsDiffError, ExError};
use esdiff_core::kinds::{
    component_template, index_template, ingest_pipeline, license, lifecycle_policy,
    resource_metadata, snapshot_lifecycle, transform,
};
use esdiff_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Managed resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    IndexLifecyclePolicy,
    IndexTemplateLegacy,
    IndexTemplate,
    IndexComponentTemplate,
    Role,
    RoleMapping,
    User,
    License,
    SnapshotRepository,
    SnapshotLifecyclePolicy,
    Watcher,
    DataStream,
    Transform,
    IngestPipeline,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 14] = [
        ResourceKind::IndexLifecyclePolicy,
        ResourceKind::IndexTemplateLegacy,
        ResourceKind::IndexTemplate,
        ResourceKind::IndexComponentTemplate,
        ResourceKind::Role,
        ResourceKind::RoleMapping,
        ResourceKind::User,
        ResourceKind::License,
        ResourceKind::SnapshotRepository,
        ResourceKind::SnapshotLifecyclePolicy,
        ResourceKind::Watcher,
        ResourceKind::DataStream,
        ResourceKind::Transform,
        ResourceKind::IngestPipeline,
    ];

    /// Resource type name as declared in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::IndexLifecyclePolicy => "elasticsearch_index_lifecycle_policy",
            ResourceKind::IndexTemplateLegacy => "elasticsearch_index_template_legacy",
            ResourceKind::IndexTemplate => "elasticsearch_index_template",
            ResourceKind::IndexComponentTemplate => "elasticsearch_index_component_template",
            ResourceKind::Role => "elasticsearch_role",
            ResourceKind::RoleMapping => "elasticsearch_role_mapping",
            ResourceKind::User => "elasticsearch_user",
            ResourceKind::License => "elasticsearch_license",
            ResourceKind::SnapshotRepository => "elasticsearch_snapshot_repository",
            ResourceKind::SnapshotLifecyclePolicy => "elasticsearch_snapshot_lifecycle_policy",
            ResourceKind::Watcher => "elasticsearch_watcher",
            ResourceKind::DataStream => "elasticsearch_data_stream",
            ResourceKind::Transform => "elasticsearch_transform",
            ResourceKind::IngestPipeline => "elasticsearch_ingest_pipeline",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = EsDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EsDiffError::UnknownResource {
                resource: s.to_string(),
            })
    }
}

/// Which comparator a field is checked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppressor {
    /// Generic structural comparison, no exclusions
    Generic,
    /// Generic comparison ignoring server-reserved metadata keys
    Metadata,
    /// Whole role body: privilege lists compare as sets
    RoleDocument,
    SnapshotLifecycleConfigs,
    LifecyclePolicy,
    ComponentTemplate,
    IndexTemplate,
    IngestPipeline,
    Transform,
    License,
}

impl Suppressor {
    pub fn diff(&self, old: &str, new: &str) -> DiffResult {
        match self {
            Suppressor::Generic => {
                esdiff_core::diff::diff_json(old, new, &ExclusionSet::new())
            }
            Suppressor::Metadata => resource_metadata::diff_metadata(old, new),
            Suppressor::RoleDocument => resource_metadata::diff_role(old, new),
            Suppressor::SnapshotLifecycleConfigs => snapshot_lifecycle::diff_configs(old, new),
            Suppressor::LifecyclePolicy => lifecycle_policy::diff(old, new),
            Suppressor::ComponentTemplate => component_template::diff(old, new),
            Suppressor::IndexTemplate => index_template::diff(old, new),
            Suppressor::IngestPipeline => ingest_pipeline::diff(old, new),
            Suppressor::Transform => transform::diff(old, new),
            Suppressor::License => license::diff(old, new),
        }
    }

    pub fn is_equivalent(&self, old: &str, new: &str) -> bool {
        match self {
            Suppressor::Generic => compare_equivalent(old, new, &ExclusionSet::new()),
            other => other.diff(old, new).is_equivalent(),
        }
    }
}

/// Field address with list indices removed: `indices.0.query` → `indices.query`.
fn canonical_field(field: &str) -> String {
    field
        .split('.')
        .filter(|t| t.parse::<usize>().is_err())
        .collect::<Vec<_>>()
        .join(".")
}

/// Lookup table from (resource, field) to comparator.
#[derive(Debug, Clone, Default)]
pub struct DiffSuppressRegistry {
    entries: BTreeMap<(ResourceKind, String), Suppressor>,
}

impl DiffSuppressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every JSON-valued field of the managed resources, plus the whole role
    /// body under `document`.
    pub fn standard() -> Self {
        use ResourceKind as R;
        use Suppressor as S;

        Self::new()
            .register(R::IndexLifecyclePolicy, "policy", S::LifecyclePolicy)
            .register(R::IndexTemplate, "template", S::IndexTemplate)
            .register(R::IndexComponentTemplate, "template", S::ComponentTemplate)
            .register(R::IndexTemplateLegacy, "template", S::Generic)
            .register(R::IngestPipeline, "pipeline", S::IngestPipeline)
            .register(R::Transform, "transform", S::Transform)
            .register(R::License, "license", S::License)
            .register(R::SnapshotLifecyclePolicy, "configs", S::SnapshotLifecycleConfigs)
            .register(R::SnapshotLifecyclePolicy, "retention", S::Generic)
            .register(R::Watcher, "trigger", S::Generic)
            .register(R::Watcher, "input", S::Generic)
            .register(R::Watcher, "condition", S::Generic)
            .register(R::Watcher, "actions", S::Generic)
            .register(R::Watcher, "metadata", S::Generic)
            .register(R::Watcher, "throttle_period", S::Generic)
            .register(R::Role, "document", S::RoleDocument)
            .register(R::Role, "metadata", S::Metadata)
            .register(R::Role, "global", S::Generic)
            .register(R::Role, "indices.query", S::Generic)
            .register(R::Role, "indices.field_security", S::Generic)
            .register(R::RoleMapping, "rules", S::Generic)
            .register(R::RoleMapping, "metadata", S::Metadata)
            .register(R::User, "metadata", S::Metadata)
            .register(R::SnapshotRepository, "settings", S::Generic)
    }

    pub fn register(mut self, kind: ResourceKind, field: &str, suppressor: Suppressor) -> Self {
        self.entries
            .insert((kind, canonical_field(field)), suppressor);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Comparator for a field. Indexed addresses such as `indices.2.query` resolve.
    pub fn lookup(&self, kind: ResourceKind, field: &str) -> Option<Suppressor> {
        self.entries.get(&(kind, canonical_field(field))).copied()
    }

    /// Compare a field's planned and refreshed values.
    ///
    /// # Errors
    ///
    /// `UnknownField` when nothing is registered for the field and
    /// `UnsupportedVersion` when the context's cluster is too old. Malformed
    /// documents are not errors here: they yield `Ok(false)` and are logged.
    pub fn evaluate(
        &self,
        ctx: &ProviderContext,
        kind: ResourceKind,
        field: &str,
        old: &str,
        new: &str,
    ) -> Result<bool, ExError> {
        log_op_start!("suppress_diff", resource = kind.as_str(), field = field);
        let start = std::time::Instant::now();

        let result = (|| -> Result<DiffResult, ExError> {
            ctx.ensure_supported()?;
            let suppressor = self.lookup(kind, field).ok_or_else(|| {
                ExError::from(EsDiffError::UnknownField {
                    resource: kind.as_str().to_string(),
                    field: field.to_string(),
                })
                .with_op("suppress_diff")
            })?;
            Ok(suppressor.diff(old, new))
        })();

        let elapsed = start.elapsed().as_millis() as u64;
        match result {
            Ok(diff) => {
                let equivalent = diff.is_equivalent();
                if !equivalent {
                    tracing::debug!(
                        resource = kind.as_str(),
                        field = field,
                        "{}",
                        render_diff_summary(&diff)
                    );
                }
                log_op_end!(
                    "suppress_diff",
                    duration_ms = elapsed,
                    resource = kind.as_str(),
                    field = field,
                    equivalent = equivalent
                );
                Ok(equivalent)
            }
            Err(e) => {
                log_op_error!("suppress_diff", e.clone(), duration_ms = elapsed);
                Err(e.with_managed_kind(kind.as_str()))
            }
        }
    }

    /// [`evaluate`](Self::evaluate) addressed by resource type name.
    ///
    /// # Errors
    ///
    /// `UnknownResource` for an unrecognised name, otherwise as `evaluate`.
    pub fn evaluate_named(
        &self,
        ctx: &ProviderContext,
        resource: &str,
        field: &str,
        old: &str,
        new: &str,
    ) -> Result<bool, ExError> {
        let kind = ResourceKind::from_str(resource)
            .map_err(|e| ExError::from(e).with_op("suppress_diff"))?;
        self.evaluate(ctx, kind, field, old, new)
    }

    /// The boolean suppression contract. Any failure means "do not suppress".
    pub fn suppress(
        &self,
        ctx: &ProviderContext,
        kind: ResourceKind,
        field: &str,
        old: &str,
        new: &str,
    ) -> bool {
        self.evaluate(ctx, kind, field, old, new).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(ResourceKind::from_str("elasticsearch_kibana_space").is_err());
    }

    #[test]
    fn test_canonical_field_drops_indices() {
        assert_eq!(canonical_field("indices.0.query"), "indices.query");
        assert_eq!(canonical_field("indices.12.field_security"), "indices.field_security");
        assert_eq!(canonical_field("policy"), "policy");
    }

    #[test]
    fn test_standard_table() {
        let registry = DiffSuppressRegistry::standard();
        assert_eq!(registry.len(), 24);
        assert_eq!(
            registry.lookup(ResourceKind::IndexLifecyclePolicy, "policy"),
            Some(Suppressor::LifecyclePolicy)
        );
        assert_eq!(
            registry.lookup(ResourceKind::Role, "indices.3.query"),
            Some(Suppressor::Generic)
        );
        assert_eq!(
            registry.lookup(ResourceKind::Role, "document"),
            Some(Suppressor::RoleDocument)
        );
        assert_eq!(registry.lookup(ResourceKind::DataStream, "name"), None);
        assert_eq!(registry.lookup(ResourceKind::Transform, "name"), None);
    }

    #[test]
    fn test_role_document_ignores_privilege_order() {
        let s = Suppressor::RoleDocument;
        assert!(s.is_equivalent(
            r#"{"cluster":["monitor","manage_ilm"],"run_as":["svc"]}"#,
            r#"{"run_as":["svc"],"cluster":["manage_ilm","monitor"],"transient_metadata":{"enabled":true}}"#,
        ));
        assert!(!s.is_equivalent(r#"{"cluster":["monitor"]}"#, r#"{"cluster":["all"]}"#));
    }

    #[test]
    fn test_generic_suppressor_paths_agree() {
        let s = Suppressor::Generic;
        assert!(s.is_equivalent(r#"{"a":1}"#, r#"{"a":1.0}"#));
        assert!(s.diff(r#"{"a":1}"#, r#"{"a":1.0}"#).is_equivalent());
        assert!(!s.is_equivalent("{", "{}"));
    }
}
