//! Credential storage.
//!
//! A credential is the session's bearer token plus a role marker, with an
//! expiry. At most one credential is live per store; absence means
//! anonymous. Only the transport writes a store (on auth responses, on
//! 401s, and on explicit logout); every other component reads.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default credential lifetime: 7 days.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// A session credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Credential expiring `ttl` from now.
    pub fn new(token: impl Into<String>, role: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: token.into(),
            role: role.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Credential with the default 7-day lifetime.
    pub fn with_default_ttl(token: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(token, role, Duration::days(DEFAULT_TTL_DAYS))
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Storage for the session credential. Expired credentials read as `None`.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<Credential>;
    fn set(&self, credential: Credential);
    fn clear(&self);
}

/// Process-wide in-memory store. Last writer wins.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        let guard = self.inner.read();
        guard.as_ref().filter(|c| !c.is_expired()).cloned()
    }

    fn set(&self, credential: Credential) {
        *self.inner.write() = Some(credential);
    }

    fn clear(&self) {
        *self.inner.write() = None;
    }
}

/// File-backed store: one JSON document, written atomically
/// (write to .tmp, then rename).
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        let contents = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read credential file");
                return None;
            }
        };
        match serde_json::from_slice::<Credential>(&contents) {
            Ok(credential) if !credential.is_expired() => Some(credential),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt credential file");
                None
            }
        }
    }

    fn set(&self, credential: Credential) {
        let serialized = match serde_json::to_vec_pretty(&credential) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize credential");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!(path = %parent.display(), error = %e, "failed to create credential directory");
                return;
            }
        }
        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp_path, &serialized)
            .and_then(|_| std::fs::rename(&tmp_path, &self.path))
        {
            tracing::error!(path = %self.path.display(), error = %e, "failed to persist credential");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove credential file");
            }
        }
    }
}
