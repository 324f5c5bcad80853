//! Application state and core data types for termhub.
//!
//! `App` is the single owner of all mutable state: the session collection,
//! the active-session pointer, the pending input line, the recall history,
//! and the one in-flight execution token. Every mutation happens on the
//! event-loop thread through methods defined here and in the submodules;
//! the executor worker threads only ever talk back through a channel.

mod commands;
mod input;
mod sessions;

use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use ratatui::layout::Rect;

use crate::config::Config;
use crate::exec::{CancelToken, CommandExecutor, ExecReply};
use crate::history::HistoryNavigator;
use crate::session::{EntryKind, Session, SessionId, SessionStore};
use crate::storage::StateStore;
use crate::ui::ansi;
use crate::ui::toast::{ToastManager, ToastType};

pub use input::InputBuffer;

/// The single outstanding execution handle. Existence implies "busy".
///
/// The session id and generation are captured at submission time so the
/// eventual reply is routed to the session that issued the command and
/// stale replies from cancelled calls are recognized.
struct InFlight {
    session_id: SessionId,
    generation: u64,
    cancel: CancelToken,
}

/// A position within the scrollback pane (row/col in viewport coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbackPosition {
    /// Row index (0-based from top of the visible pane)
    pub row: usize,
    /// Column index (0-based from left)
    pub col: usize,
}

/// Text selection in the scrollback pane (anchor = mouse down, cursor =
/// current drag position)
#[derive(Debug, Clone)]
pub struct TextSelection {
    pub anchor: ScrollbackPosition,
    pub cursor: ScrollbackPosition,
}

impl TextSelection {
    /// Return (start, end) sorted top-left to bottom-right
    pub fn ordered(&self) -> (ScrollbackPosition, ScrollbackPosition) {
        if self.anchor.row < self.cursor.row
            || (self.anchor.row == self.cursor.row && self.anchor.col <= self.cursor.col)
        {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    /// Check if a cell is within the selection (standard terminal stream
    /// selection)
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (start, end) = self.ordered();
        if start.row == end.row {
            row == start.row && col >= start.col && col <= end.col
        } else if row == start.row {
            col >= start.col
        } else if row == end.row {
            col <= end.col
        } else {
            row > start.row && row < end.row
        }
    }

    /// True when anchor and cursor are the same position (no real
    /// selection)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }
}

/// One display row of the scrollback pane: a single logical line of an
/// entry, with the entry kind kept for styling.
#[derive(Debug, Clone)]
pub struct ScrollLine {
    pub raw: String,
    pub kind: EntryKind,
}

/// Main application state
pub struct App {
    /// All sessions, in collection order.
    pub store: SessionStore,
    /// Id of the session shown and receiving input. Always present in the
    /// store.
    pub active_session_id: SessionId,
    /// The one in-flight execution, if any.
    in_flight: Option<InFlight>,
    /// Monotonic dispatch counter; stale replies carry an older value.
    next_generation: u64,
    /// Command recall list (process-local, not persisted).
    pub history: HistoryNavigator,
    /// Pending input line.
    pub input: InputBuffer,

    executor: CommandExecutor,
    exec_rx: Receiver<ExecReply>,
    storage: StateStore,

    /// Transient feedback messages.
    pub toast_manager: ToastManager,
    /// Scrollback display rows of the active session, oldest first.
    scroll_cache: Vec<ScrollLine>,
    scroll_cache_dirty: bool,
    /// Scroll offset in display rows (0 = live/bottom).
    pub scroll_offset: usize,
    /// Inner area of the scrollback pane from the last draw, for mouse
    /// coordinate mapping.
    pub scrollback_area: Option<Rect>,
    /// Active mouse selection, if any.
    pub text_selection: Option<TextSelection>,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    /// Create the application, restoring persisted sessions from the
    /// platform data directory.
    pub fn new(config: &Config) -> Result<Self> {
        let storage = StateStore::open()?;
        Self::with_storage(config, storage)
    }

    /// Create the application against an explicit state store (used by
    /// tests).
    pub(crate) fn with_storage(config: &Config, storage: StateStore) -> Result<Self> {
        let (reply_tx, exec_rx) = mpsc::channel();
        let executor = CommandExecutor::new(&config.exec.base_url, config.exec.timeout(), reply_tx)
            .context("Failed to create command executor")?;

        // Restore persisted state; fall back to the single-default-session
        // bootstrap when it is missing or unreadable. A persisted active id
        // pointing at a since-deleted session falls back to the first
        // remaining session.
        let (store, active_session_id) = match storage.load_sessions() {
            Some(sessions) if !sessions.is_empty() => {
                let store = SessionStore::from_sessions(sessions);
                let active = storage
                    .load_active_id()
                    .filter(|id| store.contains(id))
                    .or_else(|| store.first_id())
                    .unwrap_or_default();
                (store, active)
            }
            _ => {
                let store = SessionStore::bootstrap();
                let active = store.first_id().unwrap_or_default();
                (store, active)
            }
        };

        Ok(Self {
            store,
            active_session_id,
            in_flight: None,
            next_generation: 0,
            history: HistoryNavigator::new(),
            input: InputBuffer::new(),
            executor,
            exec_rx,
            storage,
            toast_manager: ToastManager::new(),
            scroll_cache: Vec::new(),
            scroll_cache_dirty: true,
            scroll_offset: 0,
            scrollback_area: None,
            text_selection: None,
            should_quit: false,
        })
    }

    /// Whether a command is currently in flight.
    pub fn busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The active session. Present except transiently during teardown.
    pub fn active_session(&self) -> Option<&Session> {
        self.store.get(&self.active_session_id)
    }

    /// Rebuild the scrollback display rows if entries or the active
    /// session changed since the last draw.
    pub fn refresh_scrollback(&mut self) {
        if !self.scroll_cache_dirty {
            return;
        }
        self.scroll_cache.clear();
        if let Some(session) = self.store.get(&self.active_session_id) {
            for entry in &session.history {
                if entry.content.is_empty() {
                    self.scroll_cache.push(ScrollLine {
                        raw: String::new(),
                        kind: entry.kind,
                    });
                    continue;
                }
                for line in entry.content.lines() {
                    self.scroll_cache.push(ScrollLine {
                        raw: line.to_string(),
                        kind: entry.kind,
                    });
                }
            }
        }
        self.scroll_cache_dirty = false;
    }

    /// Current scrollback display rows (refresh first).
    pub fn scrollback(&self) -> &[ScrollLine] {
        &self.scroll_cache
    }

    pub(crate) fn mark_scrollback_dirty(&mut self) {
        self.scroll_cache_dirty = true;
    }

    /// Scroll up by the specified number of display rows, clamped to the
    /// top of the scrollback.
    pub fn scroll_up(&mut self, lines: usize) {
        self.text_selection = None;
        self.refresh_scrollback();
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    /// Scroll down by the specified number of display rows (0 = live
    /// bottom).
    pub fn scroll_down(&mut self, lines: usize) {
        self.text_selection = None;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Largest useful scroll offset for the current viewport.
    fn max_scroll(&self) -> usize {
        let viewport = self
            .scrollback_area
            .map(|area| area.height as usize)
            .unwrap_or(0);
        self.scroll_cache.len().saturating_sub(viewport)
    }

    /// The visible slice of the scrollback for the current offset, as
    /// (first cache index, rows).
    pub fn visible_scrollback(&self, viewport_rows: usize) -> &[ScrollLine] {
        let end = self.scroll_cache.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(viewport_rows);
        &self.scroll_cache[start..end]
    }

    /// Plain text of one visible viewport row, escapes stripped.
    pub(crate) fn visible_plain_line(&self, viewport_row: usize, viewport_rows: usize) -> Option<String> {
        self.visible_scrollback(viewport_rows)
            .get(viewport_row)
            .map(|line| ansi::plain_line(&line.raw))
    }

    pub fn clear_selection(&mut self) {
        self.text_selection = None;
    }

    pub fn toast_info(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Info);
    }

    pub fn toast_success(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Success);
    }

    pub fn toast_warning(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Warning);
    }

    pub fn toast_error(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Error);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::ExecConfig;

    /// An app wired to a temp-dir store and an unreachable execution
    /// service, for driving the state machine directly.
    pub(crate) fn app_at(dir: &std::path::Path) -> App {
        let config = Config {
            exec: ExecConfig {
                // Nothing listens here; dispatched calls fail fast and
                // their replies are never drained by these tests.
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            },
        };
        App::with_storage(&config, StateStore::at(dir)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::app_at;
    use super::*;
    use crate::session::Entry;

    #[test]
    fn first_run_bootstraps_a_single_default_session() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_at(dir.path());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, "1");
        assert_eq!(app.active_session().unwrap().name, "Terminal 1");
        assert!(!app.busy());
    }

    #[test]
    fn restore_round_trips_sessions_and_active_id() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut app = app_at(dir.path());
            app.create_session();
            app.store
                .append(&app.active_session_id.clone(), Entry::command("echo hi"));
            app.persist_sessions();
        }

        let restored = app_at(dir.path());
        assert_eq!(restored.store.len(), 2);
        assert_eq!(
            restored.active_session_id,
            restored.store.sessions()[1].id,
            "second session was active when the first process exited"
        );
        assert_eq!(
            restored.store.sessions()[1].history,
            vec![Entry::command("echo hi")]
        );
    }

    #[test]
    fn restore_with_stale_active_id_falls_back_to_first_session() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StateStore::at(dir.path());
        storage
            .save_sessions(&[
                Session::new("10", "Terminal 1"),
                Session::new("20", "Terminal 2"),
            ])
            .unwrap();
        storage.save_active_id("99").unwrap();

        let app = app_at(dir.path());
        assert_eq!(app.active_session_id, "10");
    }

    #[test]
    fn restore_bootstraps_on_corrupt_session_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sessions.json"), "]{[ definitely not json").unwrap();

        let app = app_at(dir.path());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, "1");
    }

    #[test]
    fn restore_bootstraps_on_empty_session_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sessions.json"), "[]").unwrap();

        let app = app_at(dir.path());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.active_session_id, "1");
    }

    #[test]
    fn scrollback_cache_splits_entries_into_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.store.append("1", Entry::command("cat notes"));
        app.store.append("1", Entry::output("line one\nline two\n"));
        app.mark_scrollback_dirty();
        app.refresh_scrollback();

        let rows: Vec<&str> = app.scrollback().iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(rows, vec!["$ cat notes", "line one", "line two"]);
    }

    #[test]
    fn visible_scrollback_windows_from_the_bottom() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        for i in 0..10 {
            app.store.append("1", Entry::output(format!("line {}", i)));
        }
        app.mark_scrollback_dirty();
        app.refresh_scrollback();

        let visible = app.visible_scrollback(3);
        let rows: Vec<&str> = visible.iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(rows, vec!["line 7", "line 8", "line 9"]);

        app.scroll_offset = 2;
        let visible = app.visible_scrollback(3);
        let rows: Vec<&str> = visible.iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(rows, vec!["line 5", "line 6", "line 7"]);
    }

    #[test]
    fn selection_ordering_and_containment() {
        let sel = TextSelection {
            anchor: ScrollbackPosition { row: 3, col: 10 },
            cursor: ScrollbackPosition { row: 1, col: 4 },
        };
        let (start, end) = sel.ordered();
        assert_eq!(start, ScrollbackPosition { row: 1, col: 4 });
        assert_eq!(end, ScrollbackPosition { row: 3, col: 10 });

        assert!(sel.contains(1, 4));
        assert!(sel.contains(1, 99));
        assert!(sel.contains(2, 0));
        assert!(sel.contains(3, 10));
        assert!(!sel.contains(3, 11));
        assert!(!sel.contains(0, 5));
    }
}
