//! # quest-session
//!
//! Client-side session manager for the quest/tourism app: who is signed in,
//! through which provider, and whether that is still being determined.
//!
//! The manager persists its single user record to device-local key-value
//! storage and restores it on startup. UI surfaces read the current user
//! and loading flag and call `login`/`logout`; nothing else mutates the
//! session.

pub mod config;
pub mod session;
pub mod storage;

pub use config::SessionConfig;
pub use session::{ProviderKind, SessionError, SessionManager, SessionState, UserRecord};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
