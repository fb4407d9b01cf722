//! Key records and the provider interface used to resolve them.
//!
//! The core never stores keys. Callers hand it a [`KeyProvider`], which
//! owns key records and their lifecycle; keys are borrowed read-only for
//! the duration of one sign or verify call.

use crate::{
    encoder::create_token_at,
    error::{FailureReason, JwtError, JwtResult},
    scheme::SigningScheme,
    types::Token,
    validation::ValidationOptions,
    validator::{ValidationResult, validate_at},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId(pub u64);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    /// Shared HMAC secret
    Symmetric,
    /// RSA key pair
    Asymmetric,
}

/// Key record.
///
/// Symmetric keys carry the raw secret. Asymmetric keys carry PKCS#8 DER
/// private material and SPKI DER public material; either may be absent
/// (a verification-only record has no private half).
#[derive(Clone)]
pub struct Key {
    /// Identifier assigned by the provider
    pub id: KeyId,
    /// Human-readable name
    pub name: String,
    /// Symmetric or asymmetric
    pub kind: KeyKind,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Only active keys may sign or verify
    pub active: bool,
    secret_material: Option<Zeroizing<Vec<u8>>>,
    public_material: Option<Vec<u8>>,
}

impl Key {
    /// Active symmetric key record.
    #[must_use]
    pub fn symmetric(
        id: KeyId,
        name: impl Into<String>,
        secret: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: KeyKind::Symmetric,
            created_at,
            active: true,
            secret_material: Some(Zeroizing::new(secret)),
            public_material: None,
        }
    }

    /// Active asymmetric key record.
    #[must_use]
    pub fn asymmetric(
        id: KeyId,
        name: impl Into<String>,
        private_der: Option<Vec<u8>>,
        public_der: Option<Vec<u8>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: KeyKind::Asymmetric,
            created_at,
            active: true,
            secret_material: private_der.map(Zeroizing::new),
            public_material: public_der,
        }
    }

    /// Secret (symmetric) or private (asymmetric) material.
    #[must_use]
    pub fn secret_material(&self) -> Option<&[u8]> {
        self.secret_material.as_deref().map(Vec::as_slice)
    }

    /// Public material (asymmetric only).
    #[must_use]
    pub fn public_material(&self) -> Option<&[u8]> {
        self.public_material.as_deref()
    }

    /// Copy of this record without secret or private material.
    #[must_use]
    pub fn public_only(&self) -> Self {
        Self {
            secret_material: None,
            ..self.clone()
        }
    }

    /// Build the signing scheme for this key.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` if the key is inactive or a symmetric key
    /// has no secret; `JwtError::InvalidKey` if RSA material cannot be parsed.
    pub fn signing_scheme(&self) -> JwtResult<SigningScheme> {
        if !self.active {
            return Err(JwtError::KeyUnavailable(format!("key {} is inactive", self.id)));
        }
        match self.kind {
            KeyKind::Symmetric => {
                let secret = self.secret_material().ok_or_else(|| {
                    JwtError::KeyUnavailable(format!("key {} has no secret", self.id))
                })?;
                Ok(SigningScheme::symmetric(secret))
            }
            KeyKind::Asymmetric => {
                SigningScheme::rsa_from_der(self.secret_material(), self.public_material())
            }
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .field("active", &self.active)
            .field("has_secret", &self.secret_material.is_some())
            .field("has_public", &self.public_material.is_some())
            .finish()
    }
}

/// Resolves key identifiers to key records.
///
/// Lookups must be side-effect free; serializing concurrent rotation is the
/// provider's responsibility.
pub trait KeyProvider: Send + Sync {
    /// Key record for `id`, active or not; `None` if unknown.
    fn lookup(&self, id: KeyId) -> Option<Key>;
}

impl<T: KeyProvider + ?Sized> KeyProvider for std::sync::Arc<T> {
    fn lookup(&self, id: KeyId) -> Option<Key> {
        (**self).lookup(id)
    }
}

/// Look up `id` and build its signing scheme.
///
/// # Errors
/// `JwtError::KeyUnavailable` if the key is unknown or inactive, plus the
/// errors of [`Key::signing_scheme`].
pub fn resolve_scheme<P: KeyProvider + ?Sized>(provider: &P, id: KeyId) -> JwtResult<SigningScheme> {
    let key = provider
        .lookup(id)
        .ok_or_else(|| JwtError::KeyUnavailable(format!("key {id} not found")))?;
    key.signing_scheme()
}

/// Issue a token signed with the key `id` from `provider`.
///
/// # Errors
/// `JwtError::KeyUnavailable` if the key is unknown, inactive or cannot
/// sign; otherwise as [`create_token_at`].
pub fn create_token_with_key<P: KeyProvider + ?Sized>(
    provider: &P,
    id: KeyId,
    subject: &str,
    claims: &str,
    lifetime: Option<Duration>,
    now: DateTime<Utc>,
) -> JwtResult<Token> {
    let scheme = resolve_scheme(provider, id)?;
    create_token_at(subject, claims, &scheme, lifetime, now)
}

/// Validate `token` with the key `id` from `provider`.
///
/// An unknown or inactive key rejects the token with
/// [`FailureReason::KeyUnavailable`].
#[must_use]
pub fn validate_token_with_key<P: KeyProvider + ?Sized>(
    provider: &P,
    id: KeyId,
    token: &str,
    now: DateTime<Utc>,
    options: &ValidationOptions,
) -> ValidationResult {
    match resolve_scheme(provider, id) {
        Ok(scheme) => validate_at(token, &scheme, now, options),
        Err(e) => {
            tracing::warn!(key_id = %id, error = %e, "verification key unavailable");
            ValidationResult::rejected(FailureReason::KeyUnavailable)
        }
    }
}
