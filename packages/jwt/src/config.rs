//! Token issuance and validation configuration.

use crate::{
    encoder::DEFAULT_LIFETIME_SECS,
    error::{JwtError, JwtResult},
    validation::ValidationOptions,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Service-level configuration.
///
/// Every field is optional in serialized form:
///
/// ```json
/// { "default_lifetime_secs": 900, "leeway_secs": 0 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Lifetime applied when `create_token` is called without one.
    #[serde(default = "default_lifetime_secs")]
    pub default_lifetime_secs: i64,
    /// Tolerated clock skew when checking expiration (0 = none).
    #[serde(default)]
    pub leeway_secs: i64,
}

fn default_lifetime_secs() -> i64 {
    DEFAULT_LIFETIME_SECS
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            default_lifetime_secs: default_lifetime_secs(),
            leeway_secs: 0,
        }
    }
}

impl TokenConfig {
    /// Parse configuration from JSON.
    ///
    /// # Errors
    /// `JwtError::Serialization` on invalid JSON, or when the lifetime is not
    /// positive or the leeway is negative (or either exceeds what a
    /// `chrono::Duration` can hold).
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| JwtError::serialization(&e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// `JwtError::Serialization` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> JwtResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            JwtError::Serialization(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Lifetime used when none is supplied, saturating at `Duration::MAX`.
    #[must_use]
    pub fn default_lifetime(&self) -> Duration {
        Duration::try_seconds(self.default_lifetime_secs).unwrap_or(Duration::MAX)
    }

    /// Validation options derived from this configuration.
    ///
    /// Negative leeway counts as none; out-of-range leeway saturates at
    /// `Duration::MAX`.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        let leeway = Duration::try_seconds(self.leeway_secs.max(0)).unwrap_or(Duration::MAX);
        ValidationOptions::strict().with_leeway(leeway)
    }

    /// Check field ranges.
    ///
    /// # Errors
    /// `JwtError::Serialization` when the lifetime is not positive, the leeway
    /// is negative, or either exceeds what a `chrono::Duration` can hold.
    pub fn validate(&self) -> JwtResult<()> {
        let lifetime_in_range = self.default_lifetime_secs > 0
            && Duration::try_seconds(self.default_lifetime_secs).is_some();
        if !lifetime_in_range {
            return Err(JwtError::Serialization(format!(
                "default_lifetime_secs out of range, got {}",
                self.default_lifetime_secs
            )));
        }
        if self.leeway_secs < 0 || Duration::try_seconds(self.leeway_secs).is_none() {
            return Err(JwtError::Serialization(format!(
                "leeway_secs out of range, got {}",
                self.leeway_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = TokenConfig::from_json("{}").unwrap();
        assert_eq!(config, TokenConfig::default());
        assert_eq!(config.default_lifetime(), Duration::hours(1));
        assert_eq!(config.validation_options(), ValidationOptions::strict());
    }

    #[test]
    fn rejects_nonsensical_values() {
        assert!(TokenConfig::from_json(r#"{"default_lifetime_secs":0}"#).is_err());
        assert!(TokenConfig::from_json(r#"{"leeway_secs":-5}"#).is_err());
        assert!(TokenConfig::from_json(&format!(r#"{{"leeway_secs":{}}}"#, i64::MAX)).is_err());
    }

    #[test]
    fn out_of_range_fields_saturate() {
        let config = TokenConfig {
            default_lifetime_secs: i64::MAX,
            leeway_secs: i64::MAX,
        };
        assert!(config.validate().is_err());
        assert_eq!(config.default_lifetime(), Duration::MAX);
        assert_eq!(config.validation_options().leeway, Duration::MAX);

        let negative = TokenConfig {
            leeway_secs: i64::MIN,
            ..TokenConfig::default()
        };
        assert!(negative.validate().is_err());
        assert_eq!(negative.validation_options(), ValidationOptions::strict());
        assert!(TokenConfig::from_json("not json").is_err());
    }
}
