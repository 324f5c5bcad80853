//! Core session and scrollback entry types.
//!
//! These are the persisted shapes: a `Session` is a named scrollback, an
//! `Entry` is one atomic unit of scrollback content. Entries store raw text
//! exactly as submitted or as returned by the execution service; ANSI
//! styling codes are kept verbatim and only interpreted at display time.

use serde::{Deserialize, Serialize};

/// Unique identifier for a session.
pub type SessionId = String;

/// Prompt marker prefixed to submitted commands in the scrollback.
pub const PROMPT: &str = "$ ";

/// What a scrollback entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A command the user submitted (stored with the prompt marker).
    Command,
    /// Stdout text from the execution service.
    Output,
    /// Stderr text, a service-reported failure, or a local error marker.
    Error,
}

/// One atomic unit of scrollback content. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub content: String,
}

impl Entry {
    /// Entry for a submitted command, with the prompt marker applied.
    pub fn command(text: &str) -> Self {
        Self {
            kind: EntryKind::Command,
            content: format!("{}{}", PROMPT, text),
        }
    }

    /// Entry for stdout text from the execution service.
    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            content: content.into(),
        }
    }

    /// Entry for stderr text or a failure message.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            content: content.into(),
        }
    }
}

/// An independent named scrollback, analogous to a terminal tab.
///
/// Identity is the `id`; `history` is insertion-ordered and append-only
/// except for an explicit full clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    #[serde(default)]
    pub history: Vec<Entry>,
}

impl Session {
    /// Create an empty session with the given id and name.
    pub fn new(id: impl Into<SessionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            history: Vec::new(),
        }
    }
}
