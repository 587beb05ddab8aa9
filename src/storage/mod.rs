//! Device-local key-value storage consumed by the session manager.
//!
//! ARCHITECTURE
//! ============
//! `KeyValueStore` is the only seam between the session state machine and
//! whatever holds bytes on the device. The browser build maps it onto
//! `localStorage`; native builds use [`FileStore`], and tests use
//! [`MemoryStore`]. Calls are synchronous: every backend is local.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed, string-valued storage scoped to the running client.
pub trait KeyValueStore: Send + Sync {
    /// Value for `key`, or `None` if it was never set or has been removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
