//! Token service bound to one signing scheme and configuration.

use crate::{
    config::TokenConfig,
    encoder::create_token_at,
    error::JwtResult,
    futures::{TokenFuture, ValidationFuture},
    traits::Signer,
    types::Token,
    validator::{ValidationResult, validate_at},
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Issues and validates tokens with a fixed scheme.
///
/// Cloning is cheap; clones share the scheme.
pub struct TokenService<S: Signer> {
    signer: Arc<S>,
    config: TokenConfig,
}

impl<S: Signer> TokenService<S> {
    /// Create a service with the default configuration.
    pub fn new(signer: S) -> Self {
        Self {
            signer: Arc::new(signer),
            config: TokenConfig::default(),
        }
    }

    /// Create a service with an explicit configuration.
    ///
    /// # Errors
    /// `JwtError::Serialization` if the configuration is out of range
    /// (see [`TokenConfig::validate`]).
    pub fn with_config(signer: S, config: TokenConfig) -> JwtResult<Self> {
        config.validate()?;
        Ok(Self {
            signer: Arc::new(signer),
            config,
        })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Scheme in use.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Issue a token now, expiring after `lifetime` or the configured default.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` if the scheme cannot sign.
    pub fn create_token(
        &self,
        subject: &str,
        claims: &str,
        lifetime: Option<Duration>,
    ) -> JwtResult<Token> {
        self.create_token_at(subject, claims, lifetime, Utc::now())
    }

    /// Issue a token as of `now`.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` if the scheme cannot sign.
    pub fn create_token_at(
        &self,
        subject: &str,
        claims: &str,
        lifetime: Option<Duration>,
        now: DateTime<Utc>,
    ) -> JwtResult<Token> {
        let lifetime = lifetime.unwrap_or_else(|| self.config.default_lifetime());
        create_token_at(subject, claims, &*self.signer, Some(lifetime), now)
    }

    /// Validate a token against the current time.
    pub fn validate_token(&self, token: &str) -> ValidationResult {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token as of `now`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> ValidationResult {
        validate_at(token, &*self.signer, now, &self.config.validation_options())
    }
}

impl<S: Signer + 'static> TokenService<S> {
    /// Issue a token on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn create_token_async(
        &self,
        subject: impl Into<String>,
        claims: impl Into<String>,
        lifetime: Option<Duration>,
    ) -> TokenFuture {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();
        let subject = subject.into();
        let claims = claims.into();

        tokio::task::spawn_blocking(move || {
            let result = service.create_token(&subject, &claims, lifetime);
            let _ = tx.send(result);
        });

        TokenFuture::new(rx)
    }

    /// Validate a token on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn validate_token_async(&self, token: impl Into<String>) -> ValidationFuture {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();
        let token = token.into();

        tokio::task::spawn_blocking(move || {
            let result = service.validate_token(&token);
            let _ = tx.send(result);
        });

        ValidationFuture::new(rx)
    }
}

impl<S: Signer> Clone for TokenService<S> {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            config: self.config.clone(),
        }
    }
}
