//! Identity synthesis for new sessions.
//!
//! DESIGN
//! ======
//! The manager never calls a random source directly; it asks an injected
//! `IdentityGenerator`. Production uses [`RandomIdentity`]; tests plug in
//! [`SequentialIdentity`] for reproducible ids and names, or their own
//! implementation to inject faults.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use rand::Rng;
use uuid::Uuid;

use super::{ProviderKind, SessionError};

/// Identity fields synthesized for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdentity {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

pub trait IdentityGenerator: Send + Sync {
    /// Produce identity fields for a login through `provider`.
    fn generate(&self, provider: ProviderKind) -> Result<GeneratedIdentity, SessionError>;
}

/// Placeholder avatar URL seeded by the record id.
#[must_use]
pub fn avatar_url(base_url: &str, seed: &str) -> String {
    format!("{}?seed={seed}", base_url.trim_end_matches('/'))
}

const USERNAME_SUFFIXES: std::ops::Range<u32> = 1000..100_000;

/// Random v4 UUID ids and `Explorer<NNNNN>` display names. Consecutive
/// names from one generator never repeat.
#[derive(Debug)]
pub struct RandomIdentity {
    avatar_base_url: String,
    last_suffix: AtomicU32,
}

impl RandomIdentity {
    #[must_use]
    pub fn new(avatar_base_url: impl Into<String>) -> Self {
        Self { avatar_base_url: avatar_base_url.into(), last_suffix: AtomicU32::new(0) }
    }
}

/// First value from `draw` that differs from `previous`.
fn fresh_suffix(previous: u32, mut draw: impl FnMut() -> u32) -> u32 {
    loop {
        let n = draw();
        if n != previous {
            return n;
        }
    }
}

impl IdentityGenerator for RandomIdentity {
    fn generate(&self, _provider: ProviderKind) -> Result<GeneratedIdentity, SessionError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut rng = rand::rng();
        let previous = self.last_suffix.load(Ordering::Relaxed);
        let suffix = fresh_suffix(previous, || rng.random_range(USERNAME_SUFFIXES));
        self.last_suffix.store(suffix, Ordering::Relaxed);
        Ok(GeneratedIdentity {
            username: format!("Explorer{suffix}"),
            avatar: Some(avatar_url(&self.avatar_base_url, &id)),
            id,
        })
    }
}

/// Deterministic ids `<prefix>-1`, `<prefix>-2`, ... and matching names.
#[derive(Debug)]
pub struct SequentialIdentity {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdentity {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl IdentityGenerator for SequentialIdentity {
    fn generate(&self, provider: ProviderKind) -> Result<GeneratedIdentity, SessionError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{n}", self.prefix);
        Ok(GeneratedIdentity {
            username: format!("{provider}-traveler-{n}"),
            avatar: Some(format!("https://avatars.invalid/{id}.svg")),
            id,
        })
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
