//! The persisted user record and its provider tag.
//!
//! DESIGN
//! ======
//! The record is stored as a flat camelCase JSON object so sessions written
//! by the browser build of the app restore unchanged. `points` and
//! `premium` ride along untouched; nothing in this crate assigns them after
//! creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SessionError;

/// Identity provider a session was established through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Discord,
    Twitter,
    Google,
    Wallet,
}

impl ProviderKind {
    pub const ALL: [Self; 4] = [Self::Discord, Self::Twitter, Self::Google, Self::Wallet];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Twitter => "twitter",
            Self::Google => "google",
            Self::Wallet => "wallet",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SessionError::UnknownProvider(s.to_owned()))
    }
}

/// The signed-in user. At most one is current per manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque identifier generated at login.
    pub id: String,
    /// Display name; not guaranteed unique.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Placeholder avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Login path that produced this record. Fixed for the record's lifetime.
    pub auth_provider: ProviderKind,
    pub points: u64,
    pub premium: bool,
}

impl UserRecord {
    /// Build a fresh record for `provider` with zeroed gamification fields.
    #[must_use]
    pub fn new(id: String, username: String, avatar: Option<String>, provider: ProviderKind) -> Self {
        Self { id, username, email: None, avatar, auth_provider: provider, points: 0, premium: false }
    }

    /// Encode for device-local storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Encode`] if serialization fails.
    pub fn to_storage(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(SessionError::Encode)
    }

    /// Decode a value previously written by [`UserRecord::to_storage`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RestoreParse`] when `raw` is not a valid record.
    pub fn from_storage(raw: &str) -> Result<Self, SessionError> {
        serde_json::from_str(raw).map_err(SessionError::RestoreParse)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
