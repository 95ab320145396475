//! Redacting wrapper for cluster credentials
//!
//! Provider configuration carries a basic-auth password. Wrapping it in
//! `Sensitive<T>` keeps it out of `Debug` output, structured log fields and
//! error messages while still letting the transport layer read it.

use serde::{Deserialize, Deserializer};
use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Value that never renders itself in `Debug` or `Display`
///
/// # Example
///
/// ```
/// use esdiff_core_types::Sensitive;
///
/// let password = Sensitive::new("changeme");
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"changeme");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret. Only the HTTP transport should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Sensitive)
    }
}
