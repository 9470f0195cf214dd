//! Process-wide session store: the bearer token and the user profile,
//! written together on login and removed together on logout.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::storage::{CredentialStorage, MemoryStorage};
use crate::auth::UserProfile;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user profile.
pub const USER_KEY: &str = "user";

/// Shared handle to the one session store of the process.
pub type SharedSessionStore = Arc<SessionStore>;

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    profile: Option<UserProfile>,
}

/// Holds the current session and writes it through to a
/// [`CredentialStorage`] backend.
///
/// `set_session` and `clear_session` update token and profile under one
/// lock, so readers never observe one written without the other.
pub struct SessionStore {
    storage: Arc<dyn CredentialStorage>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Open the store over a backend, restoring any persisted session.
    ///
    /// A corrupt persisted profile does not fail the open: the token (if
    /// any) is kept usable and `profile()` returns `None`.
    pub fn open(storage: Arc<dyn CredentialStorage>) -> Self {
        let token = storage.get(TOKEN_KEY);
        let profile = storage.get(USER_KEY).and_then(|raw| {
            match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    warn!(error = %err, "persisted profile is malformed, ignoring it");
                    None
                }
            }
        });
        if token.is_some() {
            debug!("restored persisted session");
        }
        Self {
            storage,
            state: RwLock::new(SessionState { token, profile }),
        }
    }

    /// In-memory store with no persisted session. Used by tests and
    /// one-shot tools.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()))
    }

    /// Current bearer token, if a session exists.
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Current user profile, if one was stored and parses.
    pub fn profile(&self) -> Option<UserProfile> {
        self.read().profile.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Store token and profile together and persist both.
    pub fn set_session(&self, token: impl Into<String>, profile: UserProfile) {
        let token = token.into();
        {
            let mut state = self.write();
            state.token = Some(token.clone());
            state.profile = Some(profile.clone());
        }
        self.persist_put(TOKEN_KEY, &token);
        match serde_json::to_string(&profile) {
            Ok(raw) => self.persist_put(USER_KEY, &raw),
            Err(err) => warn!(error = %err, "failed to serialize profile for persistence"),
        }
    }

    /// Replace only the profile (after a successful profile update); the
    /// token is untouched.
    pub fn update_profile(&self, profile: UserProfile) {
        {
            let mut state = self.write();
            state.profile = Some(profile.clone());
        }
        match serde_json::to_string(&profile) {
            Ok(raw) => self.persist_put(USER_KEY, &raw),
            Err(err) => warn!(error = %err, "failed to serialize profile for persistence"),
        }
    }

    /// Drop token and profile, in memory and in the backend.
    pub fn clear_session(&self) {
        {
            let mut state = self.write();
            state.token = None;
            state.profile = None;
        }
        if let Err(err) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %err, "failed to remove persisted token");
        }
        if let Err(err) = self.storage.remove(USER_KEY) {
            warn!(error = %err, "failed to remove persisted profile");
        }
    }

    fn persist_put(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.put(key, value) {
            warn!(key, error = %err, "failed to persist session value");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

// ── Tests ──────────────────────────────────────────────────────
