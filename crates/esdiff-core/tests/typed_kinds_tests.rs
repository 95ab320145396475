#![allow(clippy::unwrap_used, clippy::expect_used)]

use esdiff_core::diff::{compare_equivalent, Change, DiffResult, ExclusionSet};
use esdiff_core::errors::ExErrorKind;
use esdiff_core::kinds::{
    component_template, index_template, ingest_pipeline, license, lifecycle_policy,
    snapshot_lifecycle, transform, LifecyclePolicy, Transform, TypedDocument,
};

#[test]
fn test_empty_object_matches_empty_string() {
    assert!(compare_equivalent("{}", "", &ExclusionSet::new()));
}

#[test]
fn test_index_template_key_order() {
    assert!(compare_equivalent(
        r#"{"priority":2,"index_patterns":["a"]}"#,
        r#"{"index_patterns":["a"],"priority":2}"#,
        &ExclusionSet::new()
    ));
    assert!(index_template::is_equivalent(
        r#"{"priority":2,"index_patterns":["a"]}"#,
        r#"{"index_patterns":["a"],"priority":2}"#
    ));
}

#[test]
fn test_lifecycle_min_age_change() {
    let old = r#"{"policy":{"phases":{"delete":{"min_age":"30d","actions":{"delete":{}}}}}}"#;
    let new = r#"{"policy":{"phases":{"delete":{"min_age":"31d","actions":{"delete":{}}}}}}"#;
    let result = lifecycle_policy::diff(old, new);
    match &result {
        DiffResult::Different(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].path, "policy.phases.delete.min_age");
            assert!(matches!(entries[0].change, Change::Modified { .. }));
        }
        other => panic!("expected a difference, got {other:?}"),
    }
}

#[test]
fn test_snapshot_lifecycle_explicit_default() {
    assert!(snapshot_lifecycle::configs_equivalent(
        r#"{"indices":["*"]}"#,
        r#"{"indices":["*"],"ignore_unavailable":false}"#
    ));
}

#[test]
fn test_transform_identity_only_differences() {
    let old = r#"{"id":"t1","version":"8.1.0","create_time":1,"dest":{"index":"out"},"source":{"index":["in"]}}"#;
    let new = r#"{"id":"t2","version":"8.2.0","create_time":2,"dest":{"index":"out"},"source":{"index":["in"]}}"#;
    assert!(transform::is_equivalent(old, new));
}

#[test]
fn test_every_typed_comparator_fails_closed() {
    let valid = "{}";
    let malformed = "{\"unterminated\": ";
    let checks: [(&str, fn(&str, &str) -> bool); 7] = [
        ("lifecycle_policy", lifecycle_policy::is_equivalent),
        ("component_template", component_template::is_equivalent),
        ("index_template", index_template::is_equivalent),
        ("ingest_pipeline", ingest_pipeline::is_equivalent),
        ("transform", transform::is_equivalent),
        ("license", license::is_equivalent),
        ("snapshot_lifecycle", snapshot_lifecycle::configs_equivalent),
    ];
    for (name, check) in checks {
        assert!(!check(malformed, valid), "{name}: malformed old side");
        assert!(!check(valid, malformed), "{name}: malformed new side");
        assert!(check(valid, valid), "{name}: reflexive on empty");
    }
}

#[test]
fn test_failure_carries_kind_and_side() {
    let result = transform::diff("{}", r#"{"create_time":"soon"}"#);
    let err = result.error().expect("transform decode should fail");
    assert_eq!(err.kind(), ExErrorKind::ShapeMismatch);
    assert_eq!(err.managed_kind(), Some("transform"));
    assert_eq!(err.side(), Some("new"));
    assert_eq!(err.code(), "ERR_SHAPE_MISMATCH");
}

#[test]
fn test_decode_is_public_per_kind() {
    let policy = LifecyclePolicy::decode(r#"{"policy":{"phases":{"hot":{"actions":{}}}}}"#).unwrap();
    assert!(policy.policy.phases.contains_key("hot"));

    let transform = Transform::decode("").unwrap();
    assert_eq!(transform, Transform::default());
}

#[test]
fn test_normalization_leaves_caller_strings_untouched() {
    let old = r#"{"id":"t1","description":"d"}"#.to_string();
    let snapshot = old.clone();
    assert!(transform::is_equivalent(&old, r#"{"description":"d"}"#));
    assert_eq!(old, snapshot);
}
