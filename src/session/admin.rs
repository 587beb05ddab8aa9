//! Development-only admin preview.
//!
//! Signs in through Google, then hands back a copy of the record relabelled
//! with the admin sentinels. The copy is for display only: it is never
//! persisted and never becomes the current user, so nothing a client does
//! here can change the identity other consumers or later restores see.

use tracing::warn;

use super::{ProviderKind, SessionManager, UserRecord};

pub const ADMIN_USERNAME: &str = "Admin";
pub const ADMIN_EMAIL: &str = "admin@localhost";

/// Log in with Google and return an admin-labelled display copy of the new
/// record. `None` if the login failed.
pub async fn admin_preview_login(manager: &SessionManager) -> Option<UserRecord> {
    warn!("admin preview requested; relabelled identity is display-only");
    let mut preview = manager.run_login(ProviderKind::Google).await?;
    preview.username = ADMIN_USERNAME.to_owned();
    preview.email = Some(ADMIN_EMAIL.to_owned());
    Some(preview)
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
