//! Task-scoped access to the session manager.
//!
//! Prefer passing `SessionManager` explicitly. Deeply nested consumers that
//! cannot take a parameter may read it from the scope installed by
//! [`provide`]. Task-locals are not inherited by spawned tasks; wrap the
//! spawned future in `provide` again if it needs the session.

use std::future::Future;

use super::{SessionError, SessionManager};

tokio::task_local! {
    static CURRENT_SESSION: SessionManager;
}

/// Run `fut` with `manager` available to [`expect_session`].
pub async fn provide<F>(manager: SessionManager, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_SESSION.scope(manager, fut).await
}

/// Synchronous variant of [`provide`].
pub fn provide_sync<R>(manager: SessionManager, f: impl FnOnce() -> R) -> R {
    CURRENT_SESSION.sync_scope(manager, f)
}

/// The manager for the current scope.
///
/// # Errors
///
/// Returns [`SessionError::OutsideScope`] when no scope is active.
pub fn try_session() -> Result<SessionManager, SessionError> {
    CURRENT_SESSION.try_with(SessionManager::clone).map_err(|_| SessionError::OutsideScope)
}

/// The manager for the current scope.
///
/// # Panics
///
/// Panics when called outside [`provide`]/[`provide_sync`]; that is a wiring
/// bug, not a runtime condition.
#[must_use]
#[track_caller]
pub fn expect_session() -> SessionManager {
    match try_session() {
        Ok(manager) => manager,
        Err(e) => panic!("{e}: wrap the caller in session::provide"),
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
