// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory storage backend.

use super::{StorageBackend, StorageError};
use dashmap::DashMap;
use std::sync::Arc;

/// Shared in-memory storage.
///
/// Clones share the same map, so a second store built from a clone sees
/// what the first one wrote (the way a page reload sees browser storage).
/// An optional quota bounds the total bytes of keys plus values.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Arc<DashMap<String, String>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes past `bytes` total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Storage that refuses every read and write, like browser storage
    /// turned off by the user.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Raw stored value, bypassing JSON parsing.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|entry| entry.key() != key)
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_bytes_excluding(key));
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("user", "null").unwrap();
        assert_eq!(other.get_item("user").unwrap().as_deref(), Some("null"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(16);
        storage.set_item("user", "small").unwrap();

        let err = storage
            .set_item("user", "a value that is far too large")
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(storage.raw("user").as_deref(), Some("small"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        // Overwriting the same key doesn't double count the old value.
        storage.set_item("k", "987654321").unwrap();
    }

    #[test]
    fn test_disabled_refuses_everything() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(
            storage.set_item("user", "null"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            storage.get_item("user"),
            Err(StorageError::Unavailable(_))
        ));
    }
}
