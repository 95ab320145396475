//! Structural paths inside a JSON document.
//!
//! A [`FieldPath`] is the concrete location the comparator is currently
//! visiting. A [`PathPattern`] is what exclusion sets and field schemas are
//! written in. Both are tokenized by splitting on `.` so that Elasticsearch
//! setting keys which contain dots themselves (`index.refresh_interval`)
//! line up the same way whether the document nests them or not.

use std::fmt;

/// One step into a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Path of an object member under this node
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// Path of an array element under this node
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Dot-separated tokens used for pattern matching.
    ///
    /// Keys are split on `.`; indices become their decimal form.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => tokens.extend(key.split('.').map(str::to_string)),
                PathSegment::Index(i) => tokens.push(i.to_string()),
            }
        }
        tokens
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternToken {
    Literal(String),
    /// `*`: exactly one token
    Any,
    /// trailing `**`: any suffix, including none
    Rest,
}

/// Dotted path pattern, e.g. `indices.*.privileges` or `template.settings.**`.
///
/// Parsing never fails. An empty pattern matches nothing, and a pattern that
/// names a node absent from the document simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    tokens: Vec<PatternToken>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let tokens = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split('.')
                .map(|t| match t {
                    "*" => PatternToken::Any,
                    "**" => PatternToken::Rest,
                    other => PatternToken::Literal(other.to_string()),
                })
                .collect()
        };
        Self {
            raw: trimmed.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &FieldPath) -> bool {
        self.matches_tokens(&path.tokens())
    }

    /// Matches `path` or any ancestor of it.
    ///
    /// Used for rules that govern a whole subtree (scalar coercion).
    pub fn covers(&self, path: &FieldPath) -> bool {
        let tokens = path.tokens();
        (0..=tokens.len()).any(|n| self.matches_tokens(&tokens[..n]))
    }

    fn matches_tokens(&self, tokens: &[String]) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        match_from(&self.tokens, tokens)
    }
}

fn match_from(pattern: &[PatternToken], tokens: &[String]) -> bool {
    match pattern.split_first() {
        None => tokens.is_empty(),
        Some((PatternToken::Rest, _)) => true,
        Some((head, tail)) => match tokens.split_first() {
            None => false,
            Some((token, rest)) => {
                let head_ok = match head {
                    PatternToken::Any => true,
                    PatternToken::Literal(lit) => lit == token,
                    PatternToken::Rest => true,
                };
                head_ok && match_from(tail, rest)
            }
        },
    }
}

impl From<&str> for PathPattern {
    fn from(raw: &str) -> Self {
        PathPattern::parse(raw)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
