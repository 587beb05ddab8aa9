//! Client-side session state: who is signed in, and whether that is still
//! being worked out.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` is built once at startup and handed to consumers by
//! clone. Consumers that cannot take it as a parameter read it from a task
//! scope installed with [`scope::provide`]; reading outside that scope is a
//! wiring bug and panics.
//!
//! `login` and `restore` mint identities locally. Swapping them for a real
//! provider exchange changes nothing a consumer can see.

#[cfg(feature = "dev-admin")]
pub mod admin;
pub mod identity;
pub mod manager;
pub mod record;
pub mod scope;

pub use identity::{GeneratedIdentity, IdentityGenerator, RandomIdentity, SequentialIdentity};
pub use manager::{SessionManager, SessionState};
pub use record::{ProviderKind, UserRecord};
pub use scope::{expect_session, provide, provide_sync, try_session};

use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown auth provider: {0}")]
    UnknownProvider(String),
    #[error("stored session is malformed: {0}")]
    RestoreParse(#[source] serde_json::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("identity generation failed: {0}")]
    Identity(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("session accessed outside of a provided session scope")]
    OutsideScope,
}
