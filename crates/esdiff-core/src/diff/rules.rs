//! Comparison rules: which paths to ignore and how to read ambiguous fields.

use crate::path::{FieldPath, PathPattern};
use serde_json::{Map, Value};

/// Paths whose values never contribute to a "different" verdict.
///
/// Immutable once built; one is constructed per comparison call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<PathPattern>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object whose keys are paths.
    ///
    /// The values are the defaults the server would report and are ignored:
    /// any value at an excluded path is acceptable.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        map.keys().map(String::as_str).collect()
    }

    pub fn with(mut self, pattern: &str) -> Self {
        self.patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_excluded(&self, path: &FieldPath) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().map(PathPattern::parse).collect(),
        }
    }
}

/// How the comparator should read a field whose JSON shape is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Array is an unordered collection; compare as a multiset
    UnorderedSet,
    /// Scalars at and below this path compare after string coercion:
    /// `"5"` ≡ `5` and `"true"` ≡ `true`
    CoerceScalars,
}

/// Per-field annotations carried into the comparator.
///
/// Arrays default to ordered and scalars default to strict typing; only paths
/// named here behave otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSchema {
    rules: Vec<(PathPattern, FieldRule)>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unordered(mut self, pattern: &str) -> Self {
        self.rules
            .push((PathPattern::parse(pattern), FieldRule::UnorderedSet));
        self
    }

    pub fn coerce_scalars(mut self, pattern: &str) -> Self {
        self.rules
            .push((PathPattern::parse(pattern), FieldRule::CoerceScalars));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_unordered(&self, path: &FieldPath) -> bool {
        self.rules
            .iter()
            .any(|(p, r)| *r == FieldRule::UnorderedSet && p.matches(path))
    }

    pub fn coerces_scalars(&self, path: &FieldPath) -> bool {
        self.rules
            .iter()
            .any(|(p, r)| *r == FieldRule::CoerceScalars && p.covers(path))
    }
}
