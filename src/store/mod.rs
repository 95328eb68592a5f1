// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local persistent key-value store.
//!
//! [`PersistentStore`] mirrors JSON-serializable values into a
//! [`StorageBackend`] under a named key. Reads never fail: absent or
//! unparsable records yield the caller's default. Writes never fail either:
//! storage errors are logged and dropped, with no retry.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Raw string storage, one value per key.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Typed JSON mirror over a storage backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn StorageBackend>,
}

impl PersistentStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Read and parse the record under `key`.
    ///
    /// Returns `default` if the record is absent, empty, unreadable or does
    /// not parse as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored record unparsable, using default");
                default
            }
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// Failures are logged and discarded; callers are never told.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::warn!(key, error = %e, "Storage write failed, discarding");
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, &raw)
    }
}

/// Errors raised by storage backends. They never escape [`PersistentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend is switched off and refuses every operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded ({needed} bytes needed, {available} available)")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
