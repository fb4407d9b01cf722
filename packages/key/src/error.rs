//! Error handling for key generation and storage

use thiserror::Error;
use tokenstamp_jwt::KeyId;

/// Key-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No key with this identifier
    #[error("Key not found: id={id}")]
    NotFound {
        /// Requested key identifier
        id: KeyId,
    },

    /// Key is deactivated and cannot be rotated
    #[error("Key is inactive: id={id}")]
    Inactive {
        /// Requested key identifier
        id: KeyId,
    },

    /// Key generation error occurred
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// Requested key size is below the accepted minimum
    #[error("Invalid key size: minimum {minimum} bits, got {actual}")]
    InvalidKeySize {
        /// Smallest accepted size in bits
        minimum: usize,
        /// Requested size in bits
        actual: usize,
    },
}

impl KeyError {
    /// Create a key generation error
    pub fn key_generation(msg: impl Into<String>) -> Self {
        Self::KeyGeneration(msg.into())
    }
}

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;
