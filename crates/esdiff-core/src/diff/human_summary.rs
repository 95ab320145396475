//! Human-readable summary renderer for comparison results.

use crate::diff::model::{Change, DiffResult};
use serde_json::Value;

/// Render a short text summary of a [`DiffResult`].
///
/// Intended for plan diagnostics and debug logs. It is informational only;
/// the suppression verdict comes from [`DiffResult::is_equivalent`].
pub fn render_diff_summary(result: &DiffResult) -> String {
    match result {
        DiffResult::Equivalent => "No semantic changes detected.\n".to_string(),
        DiffResult::Failed(err) => format!("Comparison failed: {}\n", err),
        DiffResult::Different(entries) => {
            let mut out = format!("{} change(s):\n", entries.len());
            for entry in entries {
                let line = match &entry.change {
                    Change::Added { new } => format!("+ {}: {}", entry.path, short(new)),
                    Change::Removed { old } => format!("- {}: {}", entry.path, short(old)),
                    Change::Modified { old, new } => {
                        format!("~ {}: {} -> {}", entry.path, short(old), short(new))
                    }
                };
                out.push_str(&line);
                out.push('\n');
            }
            out
        }
    }
}

/// Compact JSON rendering, truncated to keep one entry per line readable.
fn short(value: &Value) -> String {
    const MAX: usize = 60;
    let rendered = value.to_string();
    if rendered.chars().count() <= MAX {
        rendered
    } else {
        let cut: String = rendered.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::DiffEntry;
    use crate::errors::{ExError, ExErrorKind};
    use serde_json::json;

    #[test]
    fn test_equivalent_summary() {
        assert_eq!(
            render_diff_summary(&DiffResult::Equivalent),
            "No semantic changes detected.\n"
        );
    }

    #[test]
    fn test_different_summary_lists_entries() {
        let result = DiffResult::Different(vec![
            DiffEntry::added("a", json!(1)),
            DiffEntry::removed("b", json!("x")),
            DiffEntry::modified("c[0]", json!(true), json!(false)),
        ]);
        let summary = render_diff_summary(&result);
        assert!(summary.starts_with("3 change(s):\n"));
        assert!(summary.contains("+ a: 1\n"));
        assert!(summary.contains("- b: \"x\"\n"));
        assert!(summary.contains("~ c[0]: true -> false\n"));
    }

    #[test]
    fn test_failed_summary_includes_code() {
        let err = ExError::new(ExErrorKind::MalformedJson).with_side("new");
        let summary = render_diff_summary(&DiffResult::Failed(err));
        assert!(summary.contains("ERR_MALFORMED_JSON"));
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(200);
        let summary = render_diff_summary(&DiffResult::Different(vec![DiffEntry::added(
            "k",
            json!(long),
        )]));
        assert!(summary.contains("..."));
        assert!(summary.len() < 120);
    }
}
