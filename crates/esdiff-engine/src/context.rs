//! Explicit provider context passed to every suppression call.

use crate::config::ProviderConfig;
use esdiff_core::errors::{EsDiffError, ExError};
use esdiff_core::logging_facility::Profile;
use semver::Version;

/// Oldest cluster release whose API responses the typed comparators model.
pub const MINIMUM_VERSION: Version = Version::new(8, 0, 0);

/// Configuration plus the detected cluster version.
///
/// Built once by the caller after connecting and shared by reference; it
/// carries no mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderContext {
    config: ProviderConfig,
    cluster_version: Version,
}

impl ProviderContext {
    pub fn new(config: ProviderConfig, cluster_version: Version) -> Self {
        Self {
            config,
            cluster_version,
        }
    }

    /// Build from the version string a cluster reports (`8.6.2`, `8.13.0-SNAPSHOT`).
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the version is not semver.
    pub fn with_reported_version(config: ProviderConfig, version: &str) -> Result<Self, ExError> {
        let cluster_version = Version::parse(version.trim()).map_err(|e| {
            ExError::from(EsDiffError::InvalidConfig {
                reason: format!("cluster version {:?}: {}", version, e),
            })
            .with_op("provider_context")
        })?;
        Ok(Self::new(config, cluster_version))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn cluster_version(&self) -> &Version {
        &self.cluster_version
    }

    /// Reject clusters older than [`MINIMUM_VERSION`].
    ///
    /// Pre-release tags are ignored, so `8.0.0-SNAPSHOT` is accepted.
    ///
    /// # Errors
    ///
    /// `UnsupportedVersion` naming the found and minimum versions.
    pub fn ensure_supported(&self) -> Result<(), ExError> {
        let v = &self.cluster_version;
        let release = Version::new(v.major, v.minor, v.patch);
        if release < MINIMUM_VERSION {
            return Err(ExError::from(EsDiffError::UnsupportedVersion {
                found: v.to_string(),
                minimum: MINIMUM_VERSION.to_string(),
            })
            .with_op("ensure_supported"));
        }
        Ok(())
    }

    pub fn logging_profile(&self) -> Profile {
        if self.config.debug {
            Profile::Development
        } else {
            Profile::Production
        }
    }
}
