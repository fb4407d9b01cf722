//! Concurrent in-memory key store.
//!
//! Keys are held in a `DashMap` keyed by [`KeyId`]. Identifiers are handed
//! out from a monotonically increasing counter and never reused. As a
//! [`KeyProvider`] the store only exposes active keys.

use crate::{
    error::{KeyError, Result},
    generator::{DEFAULT_RSA_BITS, MIN_RSA_BITS, generate_rsa_keypair, generate_symmetric_secret},
};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokenstamp_jwt::{Key, KeyId, KeyKind, KeyProvider};

/// Thread-safe key store backed by process memory.
#[derive(Debug)]
pub struct MemoryKeyStore {
    keys: DashMap<KeyId, Key>,
    next_id: AtomicU64,
    rsa_bits: usize,
    rotation: Mutex<()>,
}

impl Default for MemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKeyStore {
    /// Empty store generating 2048-bit RSA keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: DashMap::new(),
            next_id: AtomicU64::new(1),
            rsa_bits: DEFAULT_RSA_BITS,
            rotation: Mutex::new(()),
        }
    }

    /// Empty store generating RSA keys of `bits` bits.
    ///
    /// # Errors
    /// `KeyError::InvalidKeySize` below the minimum modulus size.
    pub fn with_rsa_bits(bits: usize) -> Result<Self> {
        if bits < MIN_RSA_BITS {
            return Err(KeyError::InvalidKeySize {
                minimum: MIN_RSA_BITS,
                actual: bits,
            });
        }
        Ok(Self {
            rsa_bits: bits,
            ..Self::new()
        })
    }

    fn allocate_id(&self) -> KeyId {
        KeyId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Generate and store a fresh HMAC secret.
    pub fn create_symmetric(&self, name: impl Into<String>) -> KeyId {
        let id = self.allocate_id();
        let secret = generate_symmetric_secret();
        let key = Key::symmetric(id, name, secret.to_vec(), Utc::now());
        tracing::info!(key_id = %id, name = %key.name, "created symmetric key");
        self.keys.insert(id, key);
        id
    }

    /// Generate and store a fresh RSA key pair.
    ///
    /// # Errors
    /// `KeyError::KeyGeneration` if RSA generation fails.
    pub fn create_asymmetric(&self, name: impl Into<String>) -> Result<KeyId> {
        let (private_der, public_der) = generate_rsa_keypair(self.rsa_bits)?.into_parts();
        let id = self.allocate_id();
        let key = Key::asymmetric(
            id,
            name,
            Some(private_der.to_vec()),
            Some(public_der),
            Utc::now(),
        );
        tracing::info!(key_id = %id, name = %key.name, bits = self.rsa_bits, "created RSA key");
        self.keys.insert(id, key);
        Ok(id)
    }

    /// Store an externally built key under its own id, replacing any record
    /// with that id. Later allocations never collide with it.
    pub fn insert(&self, key: Key) -> Option<Key> {
        let id = key.id;
        self.next_id.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
        tracing::info!(key_id = %id, name = %key.name, "inserted key");
        self.keys.insert(id, key)
    }

    fn set_active(&self, id: KeyId, active: bool) -> Result<()> {
        let mut entry = self.keys.get_mut(&id).ok_or(KeyError::NotFound { id })?;
        entry.active = active;
        Ok(())
    }

    /// Stop a key from signing or verifying.
    ///
    /// # Errors
    /// `KeyError::NotFound` for an unknown id.
    pub fn deactivate(&self, id: KeyId) -> Result<()> {
        self.set_active(id, false)?;
        tracing::info!(key_id = %id, "deactivated key");
        Ok(())
    }

    /// Re-enable a deactivated key.
    ///
    /// # Errors
    /// `KeyError::NotFound` for an unknown id.
    pub fn activate(&self, id: KeyId) -> Result<()> {
        self.set_active(id, true)?;
        tracing::info!(key_id = %id, "activated key");
        Ok(())
    }

    /// Replace `id` with a new key of the same kind and name.
    ///
    /// The new key is stored before the old one is deactivated, so at least
    /// one of them is usable at any instant. Rotations are serialized: of two
    /// concurrent rotations of the same key, the second sees it inactive.
    ///
    /// # Errors
    /// `KeyError::NotFound` for an unknown id; `KeyError::Inactive` if the
    /// key was already rotated or deactivated; generation errors for RSA keys.
    pub fn rotate(&self, id: KeyId) -> Result<KeyId> {
        let _guard = self.rotation.lock().unwrap_or_else(PoisonError::into_inner);

        let (kind, name) = match self.keys.get(&id) {
            Some(key) if key.active => (key.kind, key.name.clone()),
            Some(_) => return Err(KeyError::Inactive { id }),
            None => return Err(KeyError::NotFound { id }),
        };

        let new_id = match kind {
            KeyKind::Symmetric => self.create_symmetric(name),
            KeyKind::Asymmetric => self.create_asymmetric(name)?,
        };
        self.set_active(id, false)?;

        tracing::info!(old_key_id = %id, new_key_id = %new_id, "rotated key");
        Ok(new_id)
    }

    /// Every stored key, active or not, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.keys.iter().map(|entry| entry.value().clone()).collect();
        keys.sort_by_key(|key| key.id);
        keys
    }

    /// Key record for `id` regardless of its active state.
    #[must_use]
    pub fn get(&self, id: KeyId) -> Option<Key> {
        self.keys.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyProvider for MemoryKeyStore {
    fn lookup(&self, id: KeyId) -> Option<Key> {
        self.keys
            .get(&id)
            .filter(|entry| entry.active)
            .map(|entry| entry.value().clone())
    }
}
