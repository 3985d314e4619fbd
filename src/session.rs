//! Session Memory
//!
//! Remembers the last city each session asked about, so a follow-up like
//! "and tomorrow?" still knows where. Sessions are keyed by an identifier
//! supplied by the caller; each one sits behind its own async mutex that the
//! request handler holds for the whole request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

/// Session used when the caller does not identify one
pub const DEFAULT_SESSION: &str = "default";

/// Per-session conversational context
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionContext {
    last_city: Option<String>,
}

impl SessionContext {
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn set(&mut self, city: impl Into<String>) {
        self.last_city = Some(city.into());
    }

    /// Remember `classified` when present, otherwise fall back to memory
    pub fn resolve(&mut self, classified: Option<&str>) -> Option<String> {
        match classified {
            Some(city) => {
                self.set(city);
                Some(city.to_string())
            }
            None => self.last_city.clone(),
        }
    }
}

pub type SharedSession = Arc<AsyncMutex<SessionContext>>;

/// Sessions kept before the least recently used one is dropped
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct Entry {
    session: SharedSession,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<String, Entry>,
    clock: u64,
}

/// Bounded registry of sessions, evicting the least recently used
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<Sessions>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `max_sessions` sessions (at least one)
    #[must_use]
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Session for `id`, created empty on first use
    pub fn session(&self, id: &str) -> SharedSession {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.clock += 1;
        let now = sessions.clock;

        if let Some(entry) = sessions.entries.get_mut(id) {
            entry.last_used = now;
            return entry.session.clone();
        }

        if sessions.entries.len() >= self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!("Evicting session '{}'", oldest);
                sessions.entries.remove(&oldest);
            }
        }

        debug!("Creating session '{}'", id);
        let session = SharedSession::default();
        sessions.entries.insert(
            id.to_string(),
            Entry {
                session: session.clone(),
                last_used: now,
            },
        );
        session
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}
