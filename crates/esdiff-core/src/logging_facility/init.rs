//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level for the esdiff crates
    Development,
    /// JSON structured output, info level
    Production,
    /// No output; tests install their own capture layer
    Test,
}

impl Profile {
    /// Default filter directive when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "esdiff_core=debug,esdiff_engine=debug",
            Profile::Production => "esdiff_core=info,esdiff_engine=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Safe to call more than once; only the first call installs a subscriber.
/// If the host process already installed a global subscriber this is a no-op.
///
/// # Example
///
/// ```
/// use esdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .finish()
                    .try_init()
                    .ok();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .finish()
                    .try_init()
                    .ok();
            }
            Profile::Test => {
                // Capture is installed separately via init_test_capture()
                tracing_subscriber::registry().try_init().ok();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_default_directives_target_crates() {
        assert!(Profile::Development
            .default_directive()
            .contains("esdiff_core=debug"));
        assert!(Profile::Production
            .default_directive()
            .contains("esdiff_engine=info"));
        assert_eq!(Profile::Test.default_directive(), "off");
    }
}
