//! The session state machine.
//!
//! DESIGN
//! ======
//! State lives in a `tokio::sync::watch` channel so consumers can either
//! read a snapshot or await the next change. `restore` and `login` queue on
//! one async gate, so storage only ever sees one writer at a time. `logout`
//! skips the gate and is last-write-wins against a pending login.
//!
//! The loading flag is a count of outstanding operations. Each operation
//! holds a `LoadingGuard`; dropping it (normal return, error, or panic)
//! decrements the count, so the flag cannot stay raised after the last
//! operation settles.
//!
//! Storage writes and the matching in-memory update happen under one short
//! synchronous commit lock, shared by `sign_in` and `logout`. Whichever
//! takes it last decides both the stored record and the current user.
//!
//! ERROR HANDLING
//! ==============
//! Restore faults mean "no prior session". Login faults are logged and
//! swallowed; the previous user stays current. `logout` always clears the
//! in-memory user but returns the storage error if the key could not be
//! removed; until it is, the next restore signs the user back in.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, MutexGuard, PoisonError};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use super::{IdentityGenerator, ProviderKind, RandomIdentity, SessionError, UserRecord};
use crate::config::SessionConfig;
use crate::storage::KeyValueStore;

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<UserRecord>,
    pub is_loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Cloneable handle to the single session of this client.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn KeyValueStore>,
    identity: Arc<dyn IdentityGenerator>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    /// Outstanding restore/login operations, queued or running.
    pending: AtomicUsize,
    /// Serializes restore and login.
    op_gate: Mutex<()>,
    /// Pairs each storage write with its state update. Never held across `.await`.
    commit: std::sync::Mutex<()>,
}

impl Inner {
    fn commit(&self) -> MutexGuard<'_, ()> {
        self.commit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Raises the loading flag for as long as it is alive.
struct LoadingGuard {
    inner: Arc<Inner>,
}

impl LoadingGuard {
    fn enter(inner: &Arc<Inner>) -> Self {
        inner.state.send_modify(|s| {
            inner.pending.fetch_add(1, Ordering::SeqCst);
            s.is_loading = true;
        });
        Self { inner: Arc::clone(inner) }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let inner = &self.inner;
        inner.state.send_modify(|s| {
            let remaining = inner.pending.fetch_sub(1, Ordering::SeqCst) - 1;
            s.is_loading = remaining > 0;
        });
    }
}

impl SessionManager {
    /// Build a manager with random identities and begin restoring any
    /// persisted session.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(store: Arc<dyn KeyValueStore>, config: SessionConfig) -> Self {
        let identity = Arc::new(RandomIdentity::new(config.avatar_base_url.clone()));
        Self::start_with_identity(store, identity, config)
    }

    /// Like [`SessionManager::start`] with an explicit identity strategy.
    ///
    /// The manager reports `is_loading` until the restore settles.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start_with_identity(
        store: Arc<dyn KeyValueStore>,
        identity: Arc<dyn IdentityGenerator>,
        config: SessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionState { current_user: None, is_loading: true });
        let manager = Self {
            inner: Arc::new(Inner {
                store,
                identity,
                config,
                state,
                pending: AtomicUsize::new(0),
                op_gate: Mutex::new(()),
                commit: std::sync::Mutex::new(()),
            }),
        };

        let loading = LoadingGuard::enter(&manager.inner);
        let restorer = manager.clone();
        tokio::spawn(async move {
            let _loading = loading;
            let _op = restorer.inner.op_gate.lock().await;
            restorer.restore_session();
            tokio::time::sleep(restorer.inner.config.restore_delay).await;
        });

        manager
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.inner.state.borrow().current_user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Wait until no restore or login is outstanding.
    pub async fn ready(&self) -> SessionState {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(|s| !s.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Sign in through `provider`. Resolves once the attempt has settled;
    /// read [`SessionManager::current_user`] for the outcome.
    ///
    /// Dropping the returned future does not cancel the attempt.
    pub async fn login(&self, provider: ProviderKind) {
        self.run_login(provider).await;
    }

    /// Sign out. Safe to call when already signed out.
    ///
    /// The in-memory user is cleared even when this fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the stored record could not be
    /// removed; a restart would restore it.
    pub fn logout(&self) -> Result<(), SessionError> {
        let _commit = self.inner.commit();
        let had_user = self.inner.state.send_if_modified(|s| s.current_user.take().is_some());
        if had_user {
            info!("signed out");
        }
        self.inner.store.remove(&self.inner.config.storage_key).map_err(|e| {
            warn!(error = %e, "failed to clear stored session");
            SessionError::from(e)
        })
    }

    pub(crate) async fn run_login(&self, provider: ProviderKind) -> Option<UserRecord> {
        let loading = LoadingGuard::enter(&self.inner);
        let manager = self.clone();
        let task = tokio::spawn(async move {
            let _loading = loading;
            let _op = manager.inner.op_gate.lock().await;
            tokio::time::sleep(manager.inner.config.login_delay).await;
            match manager.sign_in(provider) {
                Ok(user) => Some(user),
                Err(e) => {
                    error!(%provider, error = %e, "login failed");
                    None
                }
            }
        });

        match task.await {
            Ok(user) => user,
            Err(e) => {
                error!(%provider, error = %e, "login task did not complete");
                None
            }
        }
    }

    fn sign_in(&self, provider: ProviderKind) -> Result<UserRecord, SessionError> {
        let generated = self.inner.identity.generate(provider)?;
        let user = UserRecord::new(generated.id, generated.username, generated.avatar, provider);
        let encoded = user.to_storage()?;

        let _commit = self.inner.commit();
        self.inner.store.set(&self.inner.config.storage_key, &encoded)?;
        self.inner.state.send_modify(|s| s.current_user = Some(user.clone()));
        info!(user_id = %user.id, %provider, "signed in");
        Ok(user)
    }

    fn restore_session(&self) {
        let key = &self.inner.config.storage_key;
        let restored = match self.inner.store.get(key) {
            Ok(Some(raw)) => match UserRecord::from_storage(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!(error = %e, "ignoring malformed stored session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session storage unreadable; starting signed out");
                None
            }
        };

        if let Some(user) = restored {
            info!(user_id = %user.id, provider = %user.auth_provider, "session restored");
            self.inner.state.send_modify(|s| s.current_user = Some(user));
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.inner.state.borrow())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
