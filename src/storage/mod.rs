//! Persistent key-value slots: one string value per named slot.

mod file;
mod memory;

pub use file::FileSlotStore;
pub use memory::MemorySlotStore;

/// Errors from reading or writing a slot.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// Writing would exceed the store's byte quota.
    QuotaExceeded { limit: usize, needed: usize },
    /// Slot keys are limited to ASCII alphanumerics, `-` and `_`.
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StorageError::QuotaExceeded { limit, needed } => {
                write!(f, "Storage quota exceeded ({} bytes needed, limit {})", needed, limit)
            }
            StorageError::InvalidKey(key) => write!(f, "Invalid slot key {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// A storage medium holding named string slots.
pub trait SlotStore: Send + Sync {
    /// Read a slot. `Ok(None)` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
