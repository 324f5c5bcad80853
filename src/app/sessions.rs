//! Session lifecycle methods on App.
//!
//! Creating, closing, switching, and clearing sessions, plus the
//! persistence writes that follow every mutation. Switching the active
//! session never cancels an in-flight command — its result is still routed
//! to the session that issued it.

use super::App;

impl App {
    /// Create a new empty session at the end of the collection and make it
    /// active.
    pub fn create_session(&mut self) {
        let id = self.store.create();
        let name = self
            .store
            .get(&id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        self.activate_session(&id);
        self.persist_sessions();
        self.persist_active();
        self.toast_success(format!("{} opened", name));
    }

    /// Close a session by id.
    ///
    /// Refused when it is the only remaining session. If the closed
    /// session was active, the first remaining session in collection order
    /// becomes active.
    pub fn close_session(&mut self, id: &str) {
        if self.store.len() <= 1 {
            self.toast_warning("Cannot close the last session");
            return;
        }
        if !self.store.remove(id) {
            return;
        }

        if self.active_session_id == id {
            if let Some(first) = self.store.first_id() {
                self.activate_session(&first);
            }
            self.persist_active();
        }
        self.persist_sessions();
        self.toast_info("Session closed");
    }

    /// Close the currently active session.
    pub fn close_active_session(&mut self) {
        let id = self.active_session_id.clone();
        self.close_session(&id);
    }

    /// Switch the active session to the next one in collection order,
    /// wrapping around.
    pub fn next_session(&mut self) {
        self.cycle_session(1);
    }

    /// Switch the active session to the previous one in collection order,
    /// wrapping around.
    pub fn prev_session(&mut self) {
        self.cycle_session(-1);
    }

    fn cycle_session(&mut self, step: isize) {
        let sessions = self.store.sessions();
        if sessions.len() < 2 {
            return;
        }
        let Some(current) = sessions
            .iter()
            .position(|s| s.id == self.active_session_id)
        else {
            return;
        };
        let len = sessions.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        let id = sessions[next].id.clone();
        self.activate_session(&id);
        self.persist_active();
    }

    /// Make the given session active, resetting view state. The in-flight
    /// command (if any) keeps running and will land in its own session.
    pub fn activate_session(&mut self, id: &str) {
        if !self.store.contains(id) {
            return;
        }
        self.active_session_id = id.to_string();
        self.scroll_offset = 0;
        self.text_selection = None;
        self.mark_scrollback_dirty();
    }

    /// Replace the active session's scrollback with an empty one. Other
    /// sessions are unaffected.
    pub fn clear_active_session(&mut self) {
        let id = self.active_session_id.clone();
        self.store.clear(&id);
        self.scroll_offset = 0;
        self.text_selection = None;
        self.mark_scrollback_dirty();
        self.persist_sessions();
    }

    /// Best-effort write of the session collection; failures are logged,
    /// never surfaced.
    pub(crate) fn persist_sessions(&self) {
        if let Err(e) = self.storage.save_sessions(self.store.sessions()) {
            tracing::warn!("failed to persist sessions: {:#}", e);
        }
    }

    /// Best-effort write of the active-session id.
    pub(crate) fn persist_active(&self) {
        if let Err(e) = self.storage.save_active_id(&self.active_session_id) {
            tracing::warn!("failed to persist active session id: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::app_at;
    use crate::session::Entry;

    #[test]
    fn create_session_activates_the_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.create_session();

        assert_eq!(app.store.len(), 2);
        assert_eq!(app.active_session_id, app.store.sessions()[1].id);
        assert_eq!(app.store.sessions()[1].name, "Terminal 2");
    }

    #[test]
    fn close_last_session_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.close_active_session();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, "1");
    }

    #[test]
    fn closing_active_session_activates_first_remaining() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.create_session();
        let second = app.active_session_id.clone();
        app.close_session(&second);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, "1");
    }

    #[test]
    fn closing_inactive_session_keeps_active_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.create_session();
        let second = app.active_session_id.clone();
        app.close_session("1");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, second);
    }

    #[test]
    fn session_cycling_wraps_in_collection_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.create_session();
        app.create_session();
        let ids: Vec<String> = app.store.sessions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(app.active_session_id, ids[2]);

        app.next_session();
        assert_eq!(app.active_session_id, ids[0]);
        app.prev_session();
        assert_eq!(app.active_session_id, ids[2]);
        app.prev_session();
        assert_eq!(app.active_session_id, ids[1]);
    }

    #[test]
    fn clear_active_only_touches_the_active_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.store.append("1", Entry::command("ls"));
        app.create_session();
        let second = app.active_session_id.clone();
        app.store.append(&second, Entry::command("pwd"));

        app.clear_active_session();

        assert!(app.store.get(&second).unwrap().history.is_empty());
        assert_eq!(app.store.get("1").unwrap().history.len(), 1);
    }

    #[test]
    fn mutations_are_persisted_as_they_happen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = crate::storage::StateStore::at(dir.path());
        {
            let mut app = app_at(dir.path());
            app.create_session();
        }
        let sessions = storage.load_sessions().unwrap();
        assert_eq!(sessions.len(), 2);
        let active = storage.load_active_id().unwrap();
        assert_eq!(active, sessions[1].id);
    }
}
