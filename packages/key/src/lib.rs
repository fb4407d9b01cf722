//! # Tokenstamp key management
//!
//! Generates HMAC secrets and RSA key pairs and keeps them in a concurrent
//! in-memory store that plugs into `tokenstamp_jwt` as a
//! [`KeyProvider`](tokenstamp_jwt::KeyProvider).
//!
//! ```no_run
//! use chrono::Utc;
//! use tokenstamp_jwt::{ValidationOptions, key::{create_token_with_key, validate_token_with_key}};
//! use tokenstamp_key::MemoryKeyStore;
//!
//! let store = MemoryKeyStore::new();
//! let id = store.create_symmetric("api");
//! let token = create_token_with_key(&store, id, "alice", "admin", None, Utc::now())?;
//! let result = validate_token_with_key(&store, id, token.as_str(), Utc::now(), &ValidationOptions::strict());
//! assert!(result.valid);
//! # Ok::<(), tokenstamp_jwt::JwtError>(())
//! ```

pub mod error;
pub mod generator;
pub mod store;

pub use error::{KeyError, Result};
pub use generator::{RsaKeyMaterial, generate_rsa_keypair, generate_symmetric_secret};
pub use store::MemoryKeyStore;
