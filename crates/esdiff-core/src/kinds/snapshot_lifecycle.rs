//! Snapshot lifecycle (SLM) `configs` and `retention` members.

use crate::diff::{Comparator, DiffResult, ExclusionSet};

/// Flags the server fills in with `false` when the declaration leaves them out.
pub const CONFIG_DEFAULTS: [&str; 2] = ["ignore_unavailable", "include_global_state"];

pub fn config_exclusions() -> ExclusionSet {
    CONFIG_DEFAULTS.into_iter().collect()
}

/// Compare two SLM `configs` documents.
pub fn diff_configs(old: &str, new: &str) -> DiffResult {
    Comparator::new()
        .with_exclusions(config_exclusions())
        .diff_str(old, new)
}

pub fn configs_equivalent(old: &str, new: &str) -> bool {
    diff_configs(old, new).is_equivalent()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_defaults_match() {
        let declared = r#"{"indices":["data-*"],"ignore_unavailable":false}"#;
        let live = r#"{"indices":["data-*"]}"#;
        assert!(configs_equivalent(declared, live));
        assert!(configs_equivalent(live, declared));
    }

    #[test]
    fn test_excluded_flags_ignored_even_when_set() {
        let declared = r#"{"indices":["data-*"],"include_global_state":true}"#;
        let live = r#"{"indices":["data-*"],"include_global_state":false}"#;
        assert!(configs_equivalent(declared, live));
    }

    #[test]
    fn test_other_members_compared() {
        let declared = r#"{"indices":["data-*"],"partial":true}"#;
        let live = r#"{"indices":["data-*"],"partial":false}"#;
        assert!(!configs_equivalent(declared, live));
    }
}
