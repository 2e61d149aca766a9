//! Database backend implementations
//!
//! The runtime is backed by a single embedded SQLite file.

pub mod sqlite;

pub use sqlite::{RowCallback, SqliteDatabase};
