//! Validated domain types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Number of leading characters of a key that may appear in logs.
const VISIBLE_PREFIX_LEN: usize = 4;

/// Keys at or below this length are never partially revealed.
const MIN_MASKABLE_LEN: usize = 8;

/// Provider API credential.
///
/// The wrapped secret never appears in `Debug` or `Display` output. Use
/// [`ApiKey::masked`] when a key has to be identified in diagnostics.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wrap a raw key, returning `None` when it is empty or only whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(SecretString::new(trimmed.to_string())))
    }

    /// Wrap an already-secret value, returning `None` when it is blank.
    #[must_use]
    pub fn from_secret(secret: &SecretString) -> Option<Self> {
        Self::new(secret.expose_secret().as_str())
    }

    /// Expose the raw key. Only the provider client should call this.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Fixed-length prefix safe to log, e.g. `AIza...`.
    #[must_use]
    pub fn masked(&self) -> String {
        let key = self.expose();
        if key.chars().count() <= MIN_MASKABLE_LEN {
            return "****".to_string();
        }
        let prefix: String = key.chars().take(VISIBLE_PREFIX_LEN).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl PartialEq for ApiKey {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for ApiKey {}

/// Deserialize an optional, possibly blank key field into `Option<ApiKey>`.
///
/// Blank strings and `null` both become `None`.
pub fn deserialize_optional_key<'de, D>(deserializer: D) -> Result<Option<ApiKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(ApiKey::new))
}
