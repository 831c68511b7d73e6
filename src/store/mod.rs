//! SQLite persistence for people, vacations and the selection history.
//!
//! The engine runs as a single short-lived process, so access is plain
//! synchronous `rusqlite`. The selection history is the source of truth for
//! "already chosen today" and for frequency statistics; the denormalized
//! `last_chosen` column on the person row is only a read optimization.

mod db;
mod history;
mod roster;

pub use db::Database;
pub use history::{LAST_CATCHER_WINDOW_DAYS, PruneStats, RecordOutcome};
