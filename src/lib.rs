//! # Rust ORM Runtime
//!
//! Runtime support for generated entity types backed by a single embedded
//! SQLite file. A code generator emits one type per entity; those types call
//! into this crate to create their table and indexes, insert rows and read
//! them back.
//!
//! The crate has two layers:
//!
//! - [`SqliteDatabase`] owns one native handle and exposes a single
//!   prepare, bind, step, finalize primitive.
//! - [`Object`] is the entity protocol generated code is written against:
//!   statement text, a value count, a position-indexed binder and, for reads,
//!   one [`Value`] shape per expected column.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_orm_runtime::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let db = SqliteDatabase::open_in_memory()?;
//!
//!     Object::create_table_if_not_exists(
//!         &db,
//!         "CREATE TABLE IF NOT EXISTS Item (__id INTEGER PRIMARY KEY NOT NULL, count INTEGER NOT NULL) STRICT;",
//!     )?;
//!
//!     let id = Object::insert_into_table(&db, "INSERT INTO Item VALUES (NULL, ?);", 1, |_| {
//!         Value::Int32(15)
//!     })?;
//!
//!     let row = Object::select_one(
//!         &db,
//!         "SELECT count FROM Item WHERE __id = ?;",
//!         1,
//!         |_| Value::Int64(id as i64),
//!         &[Value::shape(ValueKind::Int32)],
//!     )?;
//!     assert_eq!(row, vec![Value::Int32(15)]);
//!     Ok(())
//! }
//! ```
//!
//! ## Threading
//!
//! Every call blocks until the engine is done. A connection is meant for one
//! thread at a time, and [`SqliteDatabase::last_insert_row_id`] is only
//! meaningful right after the insert that produced it.

/// Core runtime types
pub mod core;

/// Database backend implementations
pub mod backends;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backends::SqliteDatabase;
    pub use crate::core::{
        DatabaseError, Object, OpenMode, OpenOptions, Result, Value, ValueKind,
    };
}

// Re-export at root level for convenience
pub use backends::{RowCallback, SqliteDatabase};
pub use core::{DatabaseError, Object, OpenMode, OpenOptions, Result, Value, ValueKind};
