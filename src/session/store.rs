//! Ordered collection of sessions.
//!
//! The store owns every session in the process. Collection order is
//! insertion order (new sessions append to the end) and is exactly the
//! persisted order. The store upholds two invariants: session ids are
//! unique, and after initialization at least one session always exists —
//! removal of the last session is refused.

use super::types::{Entry, Session, SessionId};

/// All sessions, in insertion order.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    /// Build a store from restored sessions. The caller guarantees the
    /// list is non-empty; use [`SessionStore::bootstrap`] otherwise.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        debug_assert!(!sessions.is_empty());
        Self { sessions }
    }

    /// The single-default-session bootstrap used on first run and when
    /// persisted state is missing or unreadable.
    pub fn bootstrap() -> Self {
        Self {
            sessions: vec![Session::new("1", "Terminal 1")],
        }
    }

    /// All sessions in collection order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Look up a session by id.
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Id of the first session in collection order.
    pub fn first_id(&self) -> Option<SessionId> {
        self.sessions.first().map(|s| s.id.clone())
    }

    /// Create a new empty session at the end of the collection and return
    /// its id. Names are allocated deterministically from the collection
    /// size; ids are time-based and bumped on same-millisecond collision.
    pub fn create(&mut self) -> SessionId {
        let id = self.allocate_id();
        let name = format!("Terminal {}", self.sessions.len() + 1);
        self.sessions.push(Session::new(id.clone(), name));
        id
    }

    /// Remove a session. Refused (returns false) when it is the only
    /// remaining session or the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.sessions.len() <= 1 {
            return false;
        }
        let Some(idx) = self.sessions.iter().position(|s| s.id == id) else {
            return false;
        };
        self.sessions.remove(idx);
        true
    }

    /// Append a scrollback entry to the given session. Returns false when
    /// the session no longer exists (e.g. closed while a command was in
    /// flight).
    pub fn append(&mut self, id: &str, entry: Entry) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.history.push(entry);
                true
            }
            None => false,
        }
    }

    /// Replace a session's scrollback with an empty one.
    pub fn clear(&mut self, id: &str) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.history.clear();
        }
    }

    /// Time-based id, unique for the process lifetime: same-millisecond
    /// collisions bump until free.
    fn allocate_id(&self) -> SessionId {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
