//! Durable key-value state for sessions.
//!
//! Two keys, stored as two JSON files in the data directory: the full
//! ordered session collection, and the active session id. Both are read
//! once at startup and rewritten after every mutation. Reads are lenient —
//! a missing or unparsable file yields `None` and the caller falls back to
//! the bootstrap state rather than crashing.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::session::{Session, SessionId};

const SESSIONS_FILE: &str = "sessions.json";
const ACTIVE_FILE: &str = "active_session.json";

/// File-backed store for the session collection and active-session id.
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Open the store in the platform data directory, creating it if
    /// needed.
    pub fn open() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("Could not find data directory")?
            .join("termhub");
        fs::create_dir_all(&dir).context("Failed to create data directory")?;
        Ok(Self { dir })
    }

    /// Open the store rooted at an explicit directory (used by tests).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the persisted session collection.
    ///
    /// Returns `None` when nothing was persisted yet or the file cannot be
    /// parsed; the parse failure is logged so corrupt state is diagnosable.
    pub fn load_sessions(&self) -> Option<Vec<Session>> {
        let path = self.dir.join(SESSIONS_FILE);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(sessions) => Some(sessions),
            Err(e) => {
                tracing::warn!("unparsable session state at {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load the persisted active-session id, if any.
    pub fn load_active_id(&self) -> Option<SessionId> {
        let contents = fs::read_to_string(self.dir.join(ACTIVE_FILE)).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Write the full session collection.
    pub fn save_sessions(&self, sessions: &[Session]) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(sessions).context("Failed to serialize sessions")?;
        self.write(SESSIONS_FILE, &contents)
    }

    /// Write the active-session id.
    pub fn save_active_id(&self, id: &str) -> Result<()> {
        let contents = serde_json::to_string(id).context("Failed to serialize active id")?;
        self.write(ACTIVE_FILE, &contents)
    }

    fn write(&self, file: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create data directory")?;
        let path = self.dir.join(file);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write state file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Entry;

    #[test]
    fn missing_state_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::at(dir.path());
        assert!(store.load_sessions().is_none());
        assert!(store.load_active_id().is_none());
    }

    #[test]
    fn sessions_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::at(dir.path());

        let mut a = Session::new("1", "Terminal 1");
        a.history.push(Entry::command("echo hi"));
        a.history.push(Entry::output("hi\n"));
        let b = Session::new("1754500000000", "Terminal 2");
        let sessions = vec![a, b];

        store.save_sessions(&sessions).unwrap();
        assert_eq!(store.load_sessions().unwrap(), sessions);
    }

    #[test]
    fn active_id_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::at(dir.path());
        store.save_active_id("1754500000000").unwrap();
        assert_eq!(store.load_active_id().unwrap(), "1754500000000");
    }

    #[test]
    fn corrupt_session_state_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSIONS_FILE), "{not json").unwrap();
        let store = StateStore::at(dir.path());
        assert!(store.load_sessions().is_none());
    }

    #[test]
    fn save_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let store = StateStore::at(&nested);
        store.save_sessions(&[Session::new("1", "Terminal 1")]).unwrap();
        assert!(nested.join(SESSIONS_FILE).exists());
    }
}
