//! Signing capability consumed by the encoder and validator.

use crate::{error::JwtResult, types::Algorithm};

/// Signing algorithm interface.
///
/// Implementations treat the signing input as opaque bytes and must be
/// thread-safe (Send + Sync).
pub trait Signer: Send + Sync {
    /// Header `alg` value.
    fn algorithm(&self) -> Algorithm;

    /// Sign the exact signing input bytes.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` when no signing key is held.
    fn sign(&self, input: &[u8]) -> JwtResult<Vec<u8>>;

    /// Check `signature` against the exact signing input bytes.
    ///
    /// Returns `Ok(false)` for a well-formed call whose signature does not match.
    ///
    /// # Errors
    /// `JwtError::KeyUnavailable` when no verification key is held.
    fn verify(&self, input: &[u8], signature: &[u8]) -> JwtResult<bool>;
}

/// Implementation of Signer for Arc<T> to allow shared ownership.
impl<T: Signer + ?Sized> Signer for std::sync::Arc<T> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn sign(&self, input: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(input)
    }

    fn verify(&self, input: &[u8], signature: &[u8]) -> JwtResult<bool> {
        (**self).verify(input, signature)
    }
}
