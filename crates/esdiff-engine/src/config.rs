//! Provider configuration.
//!
//! Read from `ELASTICSEARCH_*` environment variables:
//!
//! | Variable                          | Default |
//! |-----------------------------------|---------|
//! | `ELASTICSEARCH_URLS` (comma list) | none    |
//! | `ELASTICSEARCH_USERNAME`          | none    |
//! | `ELASTICSEARCH_PASSWORD`          | none    |
//! | `ELASTICSEARCH_CACERT_FILE`       | none    |
//! | `ELASTICSEARCH_INSECURE`          | `false` |
//! | `ELASTICSEARCH_RETRY`             | `6`     |
//! | `ELASTICSEARCH_WAIT_BEFORE_RETRY` | `10`    |
//! | `ELASTICSEARCH_DEBUG`             | `false` |

use esdiff_core::errors::{EsDiffError, ExError};
use esdiff_core_types::Sensitive;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const ENV_PREFIX: &str = "ELASTICSEARCH";

pub const DEFAULT_RETRY: u32 = 6;
pub const DEFAULT_WAIT_BEFORE_RETRY_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<Sensitive<String>>,
    #[serde(default)]
    pub cacert_file: Option<String>,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_retry")]
    pub retry: u32,
    #[serde(default = "default_wait_before_retry")]
    pub wait_before_retry: u64,
    #[serde(default)]
    pub debug: bool,
}

fn default_retry() -> u32 {
    DEFAULT_RETRY
}

fn default_wait_before_retry() -> u64 {
    DEFAULT_WAIT_BEFORE_RETRY_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            username: None,
            password: None,
            cacert_file: None,
            insecure: false,
            retry: DEFAULT_RETRY,
            wait_before_retry: DEFAULT_WAIT_BEFORE_RETRY_SECS,
            debug: false,
        }
    }
}

impl ProviderConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if a variable cannot be parsed into its field type.
    pub fn from_env() -> Result<Self, ExError> {
        Self::load(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if a variable cannot be parsed into its field type.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ExError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(Some(map))
    }

    fn load(source: Option<config::Map<String, String>>) -> Result<Self, ExError> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("urls")
            .source(source);

        config::Config::builder()
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<ProviderConfig>())
            .map_err(|e| invalid(e.to_string()).with_op("load_config"))
    }

    /// Check the loaded values.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when no URL is configured or a URL is not an
    /// `http`/`https` address.
    pub fn validate(&self) -> Result<(), ExError> {
        if self.urls.is_empty() {
            return Err(invalid("at least one URL is required").with_field("urls"));
        }
        for raw in &self.urls {
            let url = Url::parse(raw.trim())
                .map_err(|e| invalid(format!("{}: {}", raw, e)).with_field("urls"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(
                    invalid(format!("{}: unsupported scheme {}", raw, url.scheme()))
                        .with_field("urls"),
                );
            }
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(invalid("username and password must be set together")
                .with_field("username"));
        }
        Ok(())
    }

    pub fn wait_before_retry(&self) -> Duration {
        Duration::from_secs(self.wait_before_retry)
    }
}

fn invalid(reason: impl Into<String>) -> ExError {
    ExError::from(EsDiffError::InvalidConfig {
        reason: reason.into(),
    })
}
