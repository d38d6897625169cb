//! Persistent store: collaborator traits and the SQLite implementation.
//!
//! The engine only ever sees the traits in `traits`; `sqlite` is the
//! production backend wired up in `main`.

pub mod sqlite;
pub mod traits;

pub use sqlite::{init_db, SqliteStore};
pub use traits::{
    ConversationWriter, HistoryReader, IntentTableReader, KeywordLookup, ResponsesByIntent,
};
