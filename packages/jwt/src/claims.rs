//! Token claims and builder with compile-time validation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Typestate markers for builder pattern.
pub mod ts {
    /// Marker for a field that has been set.
    pub struct Set;
    /// Marker for a field that has not been set.
    pub struct Unset;
}

/// Immutable token claims.
///
/// Serializes with a fixed field order:
/// `{"username":..,"claims":..,"exp":..}` followed by `"iat"` when present.
/// String values are escaped by the serializer, so a subject or claims
/// string containing `"`, `\` or control characters cannot alter the
/// payload structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject name.
    #[serde(rename = "username")]
    pub subject: String,
    /// Opaque, caller-defined claims string.
    pub claims: String,
    /// Expiry (unix seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Issued-at (unix seconds).
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

impl Claims {
    /// Claims expiring `lifetime` after `now`, truncated to whole seconds.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        claims: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            subject: subject.into(),
            claims: claims.into(),
            expires_at: now.timestamp().saturating_add(lifetime.num_seconds()),
            issued_at: None,
        }
    }

    /// Start a typestate builder.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Expiry as a UTC instant, if representable.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// Compile-time checked builder for token claims.
pub struct ClaimsBuilder<Sub = ts::Unset, Exp = ts::Unset> {
    subject: Option<String>,
    claims: String,
    expires_at: Option<i64>,
    issued_at: Option<i64>,
    _phantom: PhantomData<(Sub, Exp)>,
}

impl ClaimsBuilder {
    /// Create a new claims builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: None,
            claims: String::new(),
            expires_at: None,
            issued_at: None,
            _phantom: PhantomData,
        }
    }
}

impl Default for ClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Exp> ClaimsBuilder<ts::Unset, Exp> {
    /// Set the subject.
    #[must_use]
    pub fn subject(self, subject: impl Into<String>) -> ClaimsBuilder<ts::Set, Exp> {
        ClaimsBuilder {
            subject: Some(subject.into()),
            claims: self.claims,
            expires_at: self.expires_at,
            issued_at: self.issued_at,
            _phantom: PhantomData,
        }
    }
}

impl<Sub> ClaimsBuilder<Sub, ts::Unset> {
    /// Set the expiration relative to `now`.
    #[must_use]
    pub fn expires_in(self, lifetime: Duration, now: DateTime<Utc>) -> ClaimsBuilder<Sub, ts::Set> {
        self.expires_at(now.timestamp().saturating_add(lifetime.num_seconds()))
    }

    /// Set an absolute expiration (unix seconds).
    #[must_use]
    pub fn expires_at(self, exp: i64) -> ClaimsBuilder<Sub, ts::Set> {
        ClaimsBuilder {
            subject: self.subject,
            claims: self.claims,
            expires_at: Some(exp),
            issued_at: self.issued_at,
            _phantom: PhantomData,
        }
    }
}

impl<Sub, Exp> ClaimsBuilder<Sub, Exp> {
    /// Set the opaque claims string.
    #[must_use]
    pub fn claims(mut self, claims: impl Into<String>) -> Self {
        self.claims = claims.into();
        self
    }

    /// Record the issue instant in the `iat` claim.
    #[must_use]
    pub fn issued_at(mut self, now: DateTime<Utc>) -> Self {
        self.issued_at = Some(now.timestamp());
        self
    }
}

impl ClaimsBuilder<ts::Set, ts::Set> {
    /// Build the claims. Subject and expiration must be set.
    #[must_use]
    pub fn build(self) -> Claims {
        Claims {
            subject: self.subject.unwrap_or_else(|| {
                tracing::error!("ClaimsBuilder: subject unexpectedly None despite type guarantees");
                String::new()
            }),
            claims: self.claims,
            expires_at: self.expires_at.unwrap_or_else(|| {
                tracing::error!("ClaimsBuilder: expiry unexpectedly None despite type guarantees");
                i64::MIN
            }),
            issued_at: self.issued_at,
        }
    }
}
