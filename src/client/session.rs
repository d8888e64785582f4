use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::{Session, User};

/// Credential storage read by the request stage and cleared on session expiry.
///
/// The gateway never reads ambient storage directly; it is constructed with
/// one of these, so tests can substitute their own.
pub trait SessionStore: Send + Sync {
    /// Bearer credential, if a session is active
    fn token(&self) -> Option<String>;

    /// Cached profile of the signed-in user
    fn user(&self) -> Option<User>;

    fn store(&self, session: Session);

    /// Drop both the token and the cached user
    fn clear(&self);
}

/// In-memory store for tests and short-lived processes
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>, user: User) -> Self {
        let store = Self::new();
        store.store(Session {
            token: token.into(),
            user,
        });
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.session
            .read()
            .ok()?
            .as_ref()
            .map(|s| s.token.clone())
    }

    fn user(&self) -> Option<User> {
        self.session.read().ok()?.as_ref().map(|s| s.user.clone())
    }

    fn store(&self, session: Session) {
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }
}

/// File-backed store: the token and user persist across runs, like the two
/// keys the web dashboard keeps in browser storage.
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<Session>>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => {
                let session: Session = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt session file at {}", path.display()))?;
                debug!("Loaded session for {}", session.user.email);
                Some(session)
            }
            Err(_) => None,
        };
        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    fn persist(&self, session: Option<&Session>) {
        let result = match session {
            Some(session) => serde_json::to_string_pretty(session)
                .map_err(anyhow::Error::from)
                .and_then(|json| fs::write(&self.path, json).map_err(anyhow::Error::from)),
            None => match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        };
        if let Err(e) = result {
            warn!("Failed to persist session to {}: {e}", self.path.display());
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.cached
            .read()
            .ok()?
            .as_ref()
            .map(|s| s.token.clone())
    }

    fn user(&self) -> Option<User> {
        self.cached.read().ok()?.as_ref().map(|s| s.user.clone())
    }

    fn store(&self, session: Session) {
        self.persist(Some(&session));
        if let Ok(mut guard) = self.cached.write() {
            *guard = Some(session);
        }
    }

    fn clear(&self) {
        self.persist(None);
        if let Ok(mut guard) = self.cached.write() {
            *guard = None;
        }
    }
}
