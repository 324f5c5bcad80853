//! Command lifecycle methods on App: submit, cancel, and merging executor
//! replies back into the issuing session.
//!
//! Ordering guarantees live here: the command entry is appended before the
//! executor is invoked, at most one command is in flight at a time, and a
//! reply is merged only when its generation matches the current in-flight
//! token — late replies from cancelled or superseded calls are discarded.

use super::{App, InFlight};
use crate::exec::{CancelToken, ExecOutcome, ExecReply};
use crate::session::Entry;

/// Local command that empties the active scrollback instead of being sent
/// to the execution service.
pub const CLEAR_COMMAND: &str = "clear";

impl App {
    /// Submit the pending input line as a command.
    ///
    /// No-op when the trimmed input is empty, a command is already in
    /// flight, or the active session is gone. The literal `clear` command
    /// is intercepted locally and never reaches the service.
    pub fn submit(&mut self) {
        let text = self.input.text().trim().to_string();
        if text.is_empty() || self.busy() {
            return;
        }
        let session_id = self.active_session_id.clone();
        if !self.store.contains(&session_id) {
            return;
        }

        self.history.reset_cursor();

        if text == CLEAR_COMMAND {
            self.input.clear();
            self.clear_active_session();
            return;
        }

        self.history.push(&text);
        self.store.append(&session_id, Entry::command(&text));
        self.input.clear();
        self.scroll_offset = 0;
        self.mark_scrollback_dirty();

        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = CancelToken::new();
        self.in_flight = Some(InFlight {
            session_id: session_id.clone(),
            generation,
            cancel: cancel.clone(),
        });
        self.executor.dispatch(session_id, generation, text, cancel);
        self.persist_sessions();
    }

    /// Cancel the in-flight command, if any.
    ///
    /// Appends the `^C` marker to the issuing session and returns to idle
    /// immediately; the abort is not waited for. The eventual reply of the
    /// aborted call no longer matches an in-flight token and is discarded.
    pub fn cancel(&mut self) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        flight.cancel.cancel();
        self.store.append(&flight.session_id, Entry::error("^C"));
        self.input.clear();
        if flight.session_id == self.active_session_id {
            self.mark_scrollback_dirty();
        }
        self.persist_sessions();
    }

    /// Apply all executor replies that arrived since the last tick.
    pub fn drain_exec_replies(&mut self) {
        while let Ok(reply) = self.exec_rx.try_recv() {
            self.apply_exec_reply(reply);
        }
    }

    /// Merge one executor reply into the session that issued the command.
    ///
    /// Replies whose generation does not match the current in-flight token
    /// are stale (cancelled or superseded) and ignored.
    pub(crate) fn apply_exec_reply(&mut self, reply: ExecReply) {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.generation == reply.generation);
        if !current {
            return;
        }
        self.in_flight = None;

        match reply.outcome {
            // The ^C marker was appended on the cancel path; nothing more
            // to record.
            ExecOutcome::Cancelled => {}
            ExecOutcome::ServiceError(message) => {
                self.store.append(&reply.session_id, Entry::error(message));
            }
            ExecOutcome::Completed { stdout, stderr } => {
                if !stdout.is_empty() {
                    self.store.append(&reply.session_id, Entry::output(stdout));
                }
                if !stderr.is_empty() {
                    self.store.append(&reply.session_id, Entry::error(stderr));
                }
            }
            ExecOutcome::Failed(reason) => {
                self.store.append(
                    &reply.session_id,
                    Entry::error(format!("Failed to execute command: {}", reason)),
                );
            }
        }

        if reply.session_id == self.active_session_id {
            self.scroll_offset = 0;
            self.mark_scrollback_dirty();
        }
        self.persist_sessions();
    }

    /// Ctrl+C: cancel when busy; otherwise just drop the pending input.
    pub fn interrupt(&mut self) {
        if self.busy() {
            self.cancel();
        } else {
            self.input.clear();
            self.history.reset_cursor();
        }
    }

    #[cfg(test)]
    pub(crate) fn current_generation(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|flight| flight.generation)
    }
}
