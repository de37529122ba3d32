//! In-memory slots with an optional byte quota.

use super::{check_key, SlotStore, StorageError};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
    /// Max total bytes across all slots (keys + values).
    quota: Option<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once the total size would pass `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota: Some(limit),
        }
    }

    fn lock_error() -> StorageError {
        StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "lock error"))
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        let g = self.slots.read().map_err(|_| Self::lock_error())?;
        Ok(g.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut g = self.slots.write().map_err(|_| Self::lock_error())?;
        if let Some(limit) = self.quota {
            let others: usize = g
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { limit, needed });
            }
        }
        g.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
