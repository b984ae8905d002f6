//! Credential handling for store connection strings and API keys
//!
//! Credentials are wrapped in [`secrecy::Secret`] so they are zeroed on drop,
//! redacted in `Debug` output, and only readable through `expose_secret()`.
//!
//! ```rust
//! use domekeeper::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("service-role-key");
//! assert_eq!(key.expose_secret().as_str(), "service-role-key");
//! assert!(!format!("{key:?}").contains("service-role-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload that is zeroed when dropped
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroizing, redacted string
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("postgres://u:p@localhost/domes");
        assert_eq!(secret.expose_secret().as_str(), "postgres://u:p@localhost/domes");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-key");
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-key"));
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(secret_string("   ").expose_secret().is_empty());
        assert!(!secret_string("k").expose_secret().is_empty());
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            api_key: SecretString,
        }

        let section: Section = toml::from_str(r#"api_key = "abc123""#).unwrap();
        assert_eq!(section.api_key.expose_secret().as_str(), "abc123");
    }
}
