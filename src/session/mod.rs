//! Client session: bearer token plus the cached user profile.
//!
//! # Data Flow
//! ```text
//! login / register response
//!     → Session::establish (store.save, then atomic swap)
//!     → HttpClient reads token() on every request
//! profile fetch / update
//!     → Session::update_user
//! logout
//!     → Session::clear (store.clear, then swap to empty)
//! ```
//!
//! # Design Decisions
//! - One explicit object instead of ambient global storage
//! - The store is written before the in-memory state changes, so a failed
//!   write leaves both untouched
//! - Concurrent refreshes overwrite each other; last writer wins
//! - Corrupt persisted data loads as logged out rather than failing

pub mod store;

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::User;

pub use store::{FileStore, MemoryStore, SessionStore};

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Persisted session contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Shared session handle.
pub struct Session {
    state: ArcSwap<SessionState>,
    store: Box<dyn SessionStore>,
}

impl Session {
    /// Load the session persisted in `store`. Unreadable contents start
    /// an empty session; the next save or clear replaces them.
    pub fn load(store: impl SessionStore + 'static) -> SessionResult<Self> {
        let state = match store.load() {
            Ok(state) => state,
            Err(SessionError::Corrupt(e)) => {
                tracing::warn!(error = %e, "Discarding corrupt session data");
                SessionState::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            state: ArcSwap::from_pointee(state),
            store: Box::new(store),
        })
    }

    /// An empty session that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            state: ArcSwap::from_pointee(SessionState::default()),
            store: Box::new(MemoryStore::default()),
        }
    }

    /// Current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.state.load().token.clone()
    }

    /// Cached user profile, if any.
    pub fn user(&self) -> Option<User> {
        self.state.load().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.load().token.is_some()
    }

    /// Snapshot of the whole state.
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.load_full()
    }

    /// Start a session from a login or registration response.
    pub fn establish(&self, token: String, user: User) -> SessionResult<()> {
        self.replace(SessionState {
            token: Some(token),
            user: Some(user),
        })
    }

    /// Refresh the cached profile, keeping the token.
    pub fn update_user(&self, user: User) -> SessionResult<()> {
        let current = self.state.load();
        self.replace(SessionState {
            token: current.token.clone(),
            user: Some(user),
        })
    }

    /// Log out: drop token and profile.
    pub fn clear(&self) -> SessionResult<()> {
        self.store.clear()?;
        self.state.store(Arc::new(SessionState::default()));
        tracing::info!("Session cleared");
        Ok(())
    }

    fn replace(&self, next: SessionState) -> SessionResult<()> {
        self.store.save(&next)?;
        self.state.store(Arc::new(next));
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.load();
        f.debug_struct("Session")
            .field("authenticated", &state.token.is_some())
            .field("user", &state.user.as_ref().map(|u| u.email.as_str()))
            .finish()
    }
}
