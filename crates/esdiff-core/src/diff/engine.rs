//! Generic structural JSON comparator.
//!
//! The entry points are [`compare_equivalent`] for the boolean suppression
//! contract and [`Comparator::diff_str`] when the mismatch detail is wanted.

use crate::core_types::schema::{SIDE_NEW, SIDE_OLD};
use crate::diff::model::{DiffEntry, DiffResult};
use crate::diff::rules::{ExclusionSet, FieldSchema};
use crate::errors::ExError;
use crate::json_util::{coerced_scalars_equal, is_zero_value, numbers_equal, parse_document};
use crate::path::FieldPath;
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Structural comparator configured with exclusions and field annotations.
///
/// Holds no state between calls; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    exclusions: ExclusionSet,
    schema: FieldSchema,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Parse both sides and compare them.
    ///
    /// Empty input reads as `{}`. Input that is not JSON yields
    /// [`DiffResult::Failed`]; it is never reported as equivalent.
    pub fn diff_str(&self, old: &str, new: &str) -> DiffResult {
        log_op_start!("diff_json");
        let start = std::time::Instant::now();

        let parsed = parse_document(old, SIDE_OLD)
            .and_then(|o| parse_document(new, SIDE_NEW).map(|n| (o, n)));
        let elapsed = start.elapsed().as_millis() as u64;

        match parsed {
            Ok((old_doc, new_doc)) => {
                let result = DiffResult::from_entries(self.diff_values(&old_doc, &new_doc));
                log_op_end!(
                    "diff_json",
                    duration_ms = elapsed,
                    diff_len = result.entries().len() as u64
                );
                result
            }
            Err(err) => {
                log_op_error!("diff_json", err.clone(), duration_ms = elapsed);
                DiffResult::Failed(ExError::from(err).with_op("diff_json"))
            }
        }
    }

    /// Compare two already-parsed documents.
    pub fn diff_values(&self, old: &Value, new: &Value) -> Vec<DiffEntry> {
        let mut out = Vec::new();
        self.walk(&FieldPath::root(), old, new, &mut out);
        out
    }

    pub fn equivalent_values(&self, old: &Value, new: &Value) -> bool {
        self.diff_values(old, new).is_empty()
    }

    fn walk(&self, path: &FieldPath, old: &Value, new: &Value, out: &mut Vec<DiffEntry>) {
        if self.exclusions.is_excluded(path) {
            return;
        }
        match (old, new) {
            (Value::Object(a), Value::Object(b)) => self.walk_object(path, a, b, out),
            (Value::Array(a), Value::Array(b)) => {
                if self.schema.is_unordered(path) {
                    self.walk_set(path, a, b, out);
                } else {
                    self.walk_list(path, a, b, out);
                }
            }
            // A zero value stands in for an absent member, so the populated
            // side is judged exactly as if the key were missing.
            (_, Value::Object(_)) if is_zero_value(old) => {
                self.walk_one_sided(path, new, Side::New, out)
            }
            (Value::Object(_), _) if is_zero_value(new) => {
                self.walk_one_sided(path, old, Side::Old, out)
            }
            _ => {
                if !self.scalars_equal(path, old, new) {
                    out.push(DiffEntry::modified(
                        path.to_string(),
                        old.clone(),
                        new.clone(),
                    ));
                }
            }
        }
    }

    fn walk_object(
        &self,
        path: &FieldPath,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
        out: &mut Vec<DiffEntry>,
    ) {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        for key in keys {
            let child = path.key(key);
            match (old.get(key.as_str()), new.get(key.as_str())) {
                (Some(a), Some(b)) => self.walk(&child, a, b, out),
                (Some(a), None) => self.walk_one_sided(&child, a, Side::Old, out),
                (None, Some(b)) => self.walk_one_sided(&child, b, Side::New, out),
                (None, None) => {}
            }
        }
    }

    /// A subtree present on one side only.
    ///
    /// Zero-equivalent values and excluded paths vanish; objects are descended
    /// so that an excluded or defaulted member does not drag its parent in.
    fn walk_one_sided(&self, path: &FieldPath, value: &Value, side: Side, out: &mut Vec<DiffEntry>) {
        if self.exclusions.is_excluded(path) || is_zero_value(value) {
            return;
        }
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    self.walk_one_sided(&path.key(key), inner, side, out);
                }
            }
            other => out.push(match side {
                Side::Old => DiffEntry::removed(path.to_string(), other.clone()),
                Side::New => DiffEntry::added(path.to_string(), other.clone()),
            }),
        }
    }

    fn walk_list(&self, path: &FieldPath, old: &[Value], new: &[Value], out: &mut Vec<DiffEntry>) {
        for i in 0..old.len().max(new.len()) {
            let child = path.index(i);
            if self.exclusions.is_excluded(&child) {
                continue;
            }
            match (old.get(i), new.get(i)) {
                (Some(a), Some(b)) => self.walk(&child, a, b, out),
                (Some(a), None) => out.push(DiffEntry::removed(child.to_string(), a.clone())),
                (None, Some(b)) => out.push(DiffEntry::added(child.to_string(), b.clone())),
                (None, None) => {}
            }
        }
    }

    /// Multiset comparison.
    ///
    /// Element equivalence is looser than equality (`null` ≡ `0`, `1` ≡ `1.0`)
    /// and not transitive, so pairs are found with a maximum bipartite
    /// matching rather than first fit.
    fn walk_set(&self, path: &FieldPath, old: &[Value], new: &[Value], out: &mut Vec<DiffEntry>) {
        let candidates: Vec<(usize, Vec<usize>)> = old
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.exclusions.is_excluded(&path.index(*i)))
            .map(|(i, a)| {
                let child = path.index(i);
                let partners = new
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| {
                        let mut scratch = Vec::new();
                        self.walk(&child, a, b, &mut scratch);
                        scratch.is_empty()
                    })
                    .map(|(j, _)| j)
                    .collect();
                (i, partners)
            })
            .collect();

        let mut owner: Vec<Option<usize>> = vec![None; new.len()];
        for slot in 0..candidates.len() {
            let mut seen = vec![false; new.len()];
            augment(&candidates, slot, &mut owner, &mut seen);
        }

        let mut matched = vec![false; candidates.len()];
        for slot in owner.iter().flatten() {
            matched[*slot] = true;
        }
        for (slot, (i, _)) in candidates.iter().enumerate() {
            if !matched[slot] {
                out.push(DiffEntry::removed(path.index(*i).to_string(), old[*i].clone()));
            }
        }
        for (j, b) in new.iter().enumerate() {
            let child = path.index(j);
            if owner[j].is_none() && !self.exclusions.is_excluded(&child) {
                out.push(DiffEntry::added(child.to_string(), b.clone()));
            }
        }
    }

    fn scalars_equal(&self, path: &FieldPath, old: &Value, new: &Value) -> bool {
        // An explicit null is the same as the field's default.
        if (old.is_null() && is_zero_value(new)) || (new.is_null() && is_zero_value(old)) {
            return true;
        }
        if self.schema.coerces_scalars(path) {
            return coerced_scalars_equal(old, new);
        }
        match (old, new) {
            (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
            _ => old == new,
        }
    }
}

/// Try to give `slot` a partner, re-seating earlier slots along an
/// alternating path when its candidates are taken.
fn augment(
    candidates: &[(usize, Vec<usize>)],
    slot: usize,
    owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &j in &candidates[slot].1 {
        if seen[j] {
            continue;
        }
        seen[j] = true;
        let free = match owner[j] {
            None => true,
            Some(other) => augment(candidates, other, owner, seen),
        };
        if free {
            owner[j] = Some(slot);
            return true;
        }
    }
    false
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Old,
    New,
}

/// Compare two JSON documents, ignoring `exclusions`.
///
/// Returns `false` when either side is malformed.
pub fn compare_equivalent(old: &str, new: &str, exclusions: &ExclusionSet) -> bool {
    diff_json(old, new, exclusions).is_equivalent()
}

/// Like [`compare_equivalent`] but keeps the detail.
pub fn diff_json(old: &str, new: &str, exclusions: &ExclusionSet) -> DiffResult {
    Comparator::new()
        .with_exclusions(exclusions.clone())
        .diff_str(old, new)
}
