//! Session state for the authenticated user
//!
//! The original front end kept the bearer token in ambient, globally
//! mutable storage with expiry checks scattered around call sites. Here the
//! session is an explicit object handed to whoever needs it: initialized
//! once at app start, written on login, cleared on logout.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

pub use shared::token::{decode_claims, is_expired, Claims};

/// Shared handle to the current bearer token
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adopt a token persisted by the shell at startup. Expired or
    /// undecodable tokens are discarded instead of adopted, so a stale
    /// session never looks authenticated.
    pub fn initialize(&self, persisted: Option<String>, now: DateTime<Utc>) {
        *self.write() = persisted.filter(|token| !is_expired(token, now));
    }

    /// Store the token returned by a successful login
    pub fn set_token(&self, token: String) {
        *self.write() = Some(token);
    }

    /// Drop the session (logout, or a collaborator 401/403)
    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.read().clone()
    }

    /// Claims of the current token, if one is held and decodable
    pub fn claims(&self) -> Option<Claims> {
        self.token().as_deref().and_then(decode_claims)
    }

    pub fn role_id(&self) -> Option<i64> {
        self.claims().and_then(|claims| claims.rol_id)
    }

    /// Whether a non-expired token is held at `now`
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.token()
            .map(|token| !is_expired(&token, now))
            .unwrap_or(false)
    }
}
