//! Session manager settings parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_RESTORE_DELAY_MS: u64 = 500;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";
pub const DEFAULT_STORAGE_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Settling delay before a restored session stops reporting loading.
    pub restore_delay: Duration,
    /// Simulated provider round trip for each login.
    pub login_delay: Duration,
    /// Base URL for generated placeholder avatars.
    pub avatar_base_url: String,
    /// Storage key holding the encoded user record.
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restore_delay: Duration::from_millis(DEFAULT_RESTORE_DELAY_MS),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_RESTORE_DELAY_MS`: default 500
    /// - `SESSION_LOGIN_DELAY_MS`: default 1000
    /// - `SESSION_AVATAR_BASE_URL`: dicebear avataaars endpoint
    /// - `SESSION_STORAGE_KEY`: default `user`
    ///
    /// Unparseable delays fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] if the avatar URL or storage key is set
    /// to an empty string.
    pub fn from_env() -> Result<Self, ConfigError> {
        let avatar_base_url = std::env::var("SESSION_AVATAR_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_AVATAR_BASE_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if avatar_base_url.is_empty() {
            return Err(ConfigError::Empty { var: "SESSION_AVATAR_BASE_URL" });
        }

        let storage_key = std::env::var("SESSION_STORAGE_KEY")
            .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_owned())
            .trim()
            .to_owned();
        if storage_key.is_empty() {
            return Err(ConfigError::Empty { var: "SESSION_STORAGE_KEY" });
        }

        Ok(Self {
            restore_delay: Duration::from_millis(env_parse("SESSION_RESTORE_DELAY_MS", DEFAULT_RESTORE_DELAY_MS)),
            login_delay: Duration::from_millis(env_parse("SESSION_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)),
            avatar_base_url,
            storage_key,
        })
    }

    /// Zero delays, for tests and scripted runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self { restore_delay: Duration::ZERO, login_delay: Duration::ZERO, ..Self::default() }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
