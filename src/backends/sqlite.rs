//! SQLite connection
//!
//! [`SqliteDatabase`] owns exactly one native handle and exposes the single
//! prepare, bind, step, finalize primitive the entity protocol is built on.

use crate::core::{
    config::{OpenMode, OpenOptions},
    error::{DatabaseError, Result},
    value::{Value, ValueKind},
};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, DatabaseName, Row, ToSql};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Callback invoked once per produced row; returns whether to continue
pub type RowCallback<'a> = dyn FnMut(&Row<'_>) -> Result<bool> + 'a;

/// SQLite connection owning one native handle
///
/// Not `Clone`. Moving the value moves ownership of the handle, and dropping
/// it closes the handle once.
#[derive(Debug)]
pub struct SqliteDatabase {
    connection: Connection,
    path: PathBuf,
}

impl SqliteDatabase {
    /// Open an existing store for read-write access
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &OpenOptions::new(OpenMode::ReadWrite))
    }

    /// Open a store for read-write access, creating it if absent
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &OpenOptions::new(OpenMode::ReadWriteCreate))
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::open_or_create(":memory:")
    }

    /// Open a store with explicit options
    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, options.flags())
            .map_err(|e| DatabaseError::open(path, e))?;

        // The engine can silently downgrade to read-only instead of failing.
        if connection.is_readonly(DatabaseName::Main)? {
            return Err(DatabaseError::read_only(path));
        }

        if let Some(timeout) = options.busy_timeout {
            connection.busy_timeout(timeout)?;
        }
        if options.foreign_keys {
            connection.execute_batch("PRAGMA foreign_keys = ON")?;
        }

        debug!(path = %path.display(), mode = ?options.mode, "opened database");
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// Path the store was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the handle, reporting the engine's error if closing fails
    pub fn close(self) -> Result<()> {
        let path = self.path;
        match self.connection.close() {
            Ok(()) => {
                debug!(path = %path.display(), "closed database");
                Ok(())
            }
            Err((_connection, e)) => {
                warn!(path = %path.display(), error = %e, "failed to close database");
                Err(DatabaseError::Close(e.to_string()))
            }
        }
    }

    /// Row id assigned by the most recent successful insert on this connection
    ///
    /// Only meaningful when read right after the insert, before any other
    /// statement runs on the same connection.
    pub fn last_insert_row_id(&self) -> u64 {
        self.connection.last_insert_rowid() as u64
    }

    /// Number of rows changed by the most recent write
    pub fn changes(&self) -> u64 {
        self.connection.changes() as u64
    }

    /// Prepare `statement`, bind `bind_count` values and step it to completion.
    ///
    /// `binder` is called with every 1-based position up to `bind_count`. The
    /// first bind failure is the one reported; later positions are still
    /// requested from `binder` but neither bound nor allowed to replace it, and
    /// the statement is not stepped.
    ///
    /// Each produced row is passed to `on_row`, which returns `false` to stop
    /// early. Without a callback rows are drained unread. The statement is
    /// finalized on every path before this returns.
    pub fn execute<B>(
        &self,
        statement: &str,
        bind_count: usize,
        mut binder: B,
        mut on_row: Option<&mut RowCallback<'_>>,
    ) -> Result<()>
    where
        B: FnMut(usize) -> Value,
    {
        let mut prepared = self
            .connection
            .prepare(statement)
            .map_err(DatabaseError::prepare)?;

        let mut bind_error = None;
        for position in 1..=bind_count {
            let value = binder(position);
            if bind_error.is_some() {
                continue;
            }
            if let Err(e) = prepared.raw_bind_parameter(position, &value) {
                bind_error = Some(DatabaseError::bind(position, e));
            }
        }
        if let Some(e) = bind_error {
            return Err(e);
        }

        let mut rows = prepared.raw_query();
        let mut seen = 0usize;
        let mut stopped_early = false;
        while let Some(row) = rows.next().map_err(DatabaseError::execution)? {
            seen += 1;
            if let Some(callback) = on_row.as_deref_mut() {
                if !callback(row)? {
                    stopped_early = true;
                    break;
                }
            }
        }

        trace!(statement, bind_count, rows = seen, stopped_early, "executed statement");
        Ok(())
    }

    /// Materialize one row according to `shapes`
    pub(crate) fn row_to_values(row: &Row<'_>, shapes: &[Value]) -> Result<Vec<Value>> {
        let column_count = row.as_ref().column_count();
        if column_count != shapes.len() {
            return Err(DatabaseError::column_count_mismatch(
                shapes.len(),
                column_count,
            ));
        }

        shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| Self::column_to_value(row, index, shape.kind()))
            .collect()
    }

    /// Read column `index` as `kind`, copying any bytes out of engine memory
    fn column_to_value(row: &Row<'_>, index: usize, kind: ValueKind) -> Result<Value> {
        let raw = row.get_ref(index)?;
        if let ValueRef::Null = raw {
            return Ok(Value::Null);
        }

        match kind {
            ValueKind::Null => Err(DatabaseError::InvalidShape { column: index }),
            ValueKind::Int32 => match raw {
                ValueRef::Integer(v) => i32::try_from(v)
                    .map(Value::Int32)
                    .map_err(|_| DatabaseError::OutOfRange {
                        column: index,
                        value: v,
                    }),
                other => Err(DatabaseError::type_mismatch(
                    index,
                    kind.type_name(),
                    other.data_type(),
                )),
            },
            ValueKind::Int64 => match raw {
                ValueRef::Integer(v) => Ok(Value::Int64(v)),
                other => Err(DatabaseError::type_mismatch(
                    index,
                    kind.type_name(),
                    other.data_type(),
                )),
            },
            ValueKind::Bytes => match raw {
                ValueRef::Blob(b) | ValueRef::Text(b) => Ok(Value::Bytes(b.to_vec())),
                other => Err(DatabaseError::type_mismatch(
                    index,
                    kind.type_name(),
                    other.data_type(),
                )),
            },
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Int32(v) => ToSqlOutput::from(*v),
            Value::Int64(v) => ToSqlOutput::from(*v),
            // Borrowed blobs are bound with SQLITE_TRANSIENT, so the engine copies them.
            Value::Bytes(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}
