//! Session data model: named scrollbacks and the ordered store that owns
//! them.

mod store;
mod types;

pub use store::SessionStore;
pub use types::{Entry, EntryKind, Session, SessionId, PROMPT};
