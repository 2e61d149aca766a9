//! Entity protocol
//!
//! Generated entity types embed an [`Object`] and drive the database through
//! its associated functions. Each call takes statement text, a declared value
//! count and a binder that supplies the value for a 1-based position. Reads
//! additionally take one shape per expected result column.

use crate::backends::sqlite::SqliteDatabase;
use crate::core::error::Result;
use crate::core::value::Value;
use rusqlite::Row;
use tracing::trace;

/// Base state shared by every generated entity: its connection and row id
#[derive(Debug, Clone, Copy)]
pub struct Object<'db> {
    db: &'db SqliteDatabase,
    id: u64,
}

impl<'db> Object<'db> {
    /// Bind an entity to the row `id` on `db`
    pub fn new(db: &'db SqliteDatabase, id: u64) -> Self {
        Self { db, id }
    }

    /// Row id of the entity
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Connection that produced the entity
    pub fn database(&self) -> &'db SqliteDatabase {
        self.db
    }

    /// Run table DDL. The statement itself carries the `IF NOT EXISTS`.
    pub fn create_table_if_not_exists(db: &SqliteDatabase, statement: &str) -> Result<()> {
        db.execute(statement, 0, |_| Value::Null, None)
    }

    /// Run index DDL. The statement itself carries the `IF NOT EXISTS`.
    pub fn create_index_if_not_exists(db: &SqliteDatabase, statement: &str) -> Result<()> {
        db.execute(statement, 0, |_| Value::Null, None)
    }

    /// Insert one row and return the row id the engine assigned to it.
    ///
    /// If binding fails, the first failing position is reported and nothing
    /// is inserted.
    pub fn insert_into_table<B>(
        db: &SqliteDatabase,
        statement: &str,
        value_count: usize,
        binder: B,
    ) -> Result<u64>
    where
        B: FnMut(usize) -> Value,
    {
        db.execute(statement, value_count, binder, None)?;
        let id = db.last_insert_row_id();
        trace!(id, "inserted row");
        Ok(id)
    }

    /// Run an UPDATE or DELETE and return how many rows it changed
    pub fn update_table<B>(
        db: &SqliteDatabase,
        statement: &str,
        value_count: usize,
        binder: B,
    ) -> Result<u64>
    where
        B: FnMut(usize) -> Value,
    {
        db.execute(statement, value_count, binder, None)?;
        Ok(db.changes())
    }

    /// Read at most one row, materialized according to `shapes`.
    ///
    /// Returns an empty vector when nothing matches. Rows after the first are
    /// never read. A row whose column count differs from `shapes.len()` is a
    /// [`ColumnCountMismatch`](crate::DatabaseError::ColumnCountMismatch).
    pub fn select_one<B>(
        db: &SqliteDatabase,
        statement: &str,
        value_count: usize,
        binder: B,
        shapes: &[Value],
    ) -> Result<Vec<Value>>
    where
        B: FnMut(usize) -> Value,
    {
        let mut values = Vec::new();
        let mut on_row = |row: &Row<'_>| -> Result<bool> {
            values = SqliteDatabase::row_to_values(row, shapes)?;
            Ok(false)
        };
        db.execute(statement, value_count, binder, Some(&mut on_row))?;
        Ok(values)
    }

    /// Read every produced row, each materialized according to `shapes`
    pub fn select_all<B>(
        db: &SqliteDatabase,
        statement: &str,
        value_count: usize,
        binder: B,
        shapes: &[Value],
    ) -> Result<Vec<Vec<Value>>>
    where
        B: FnMut(usize) -> Value,
    {
        let mut rows = Vec::new();
        let mut on_row = |row: &Row<'_>| -> Result<bool> {
            rows.push(SqliteDatabase::row_to_values(row, shapes)?);
            Ok(true)
        };
        db.execute(statement, value_count, binder, Some(&mut on_row))?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DatabaseError;
    use crate::core::value::ValueKind;

    const CREATE_TABLE: &str =
        "CREATE TABLE IF NOT EXISTS item (__id INTEGER PRIMARY KEY NOT NULL, count INTEGER NOT NULL, tag BLOB) STRICT;";
    const INSERT: &str = "INSERT INTO item VALUES (NULL, ?, ?);";
    const SELECT_BY_ID: &str = "SELECT count, tag FROM item WHERE __id = ?;";

    fn shapes() -> [Value; 2] {
        [
            Value::shape(ValueKind::Int64),
            Value::shape(ValueKind::Bytes),
        ]
    }

    fn setup() -> SqliteDatabase {
        let db = SqliteDatabase::open_in_memory().unwrap();
        Object::create_table_if_not_exists(&db, CREATE_TABLE).unwrap();
        db
    }

    fn insert(db: &SqliteDatabase, count: i64, tag: &[u8]) -> u64 {
        Object::insert_into_table(db, INSERT, 2, |position| match position {
            1 => Value::Int64(count),
            _ => Value::Bytes(tag.to_vec()),
        })
        .unwrap()
    }

    #[test]
    fn test_create_table_twice() {
        let db = setup();
        assert!(Object::create_table_if_not_exists(&db, CREATE_TABLE).is_ok());
    }

    #[test]
    fn test_create_index() {
        let db = setup();
        let ddl = "CREATE INDEX IF NOT EXISTS item_count ON item (count);";
        Object::create_index_if_not_exists(&db, ddl).unwrap();
        Object::create_index_if_not_exists(&db, ddl).unwrap();
    }

    #[test]
    fn test_insert_then_select() {
        let db = setup();
        let id = insert(&db, 42, b"abc");
        assert_eq!(id, 1);

        let values = Object::select_one(&db, SELECT_BY_ID, 1, |_| Value::Int64(id as i64), &shapes())
            .unwrap();
        assert_eq!(values, vec![Value::Int64(42), Value::Bytes(b"abc".to_vec())]);
    }

    #[test]
    fn test_select_one_reads_first_row_only() {
        let db = setup();
        insert(&db, 1, b"a");
        insert(&db, 2, b"b");

        let values = Object::select_one(
            &db,
            "SELECT count, tag FROM item ORDER BY __id;",
            0,
            |_| Value::Null,
            &shapes(),
        )
        .unwrap();
        assert_eq!(values, vec![Value::Int64(1), Value::Bytes(b"a".to_vec())]);
    }

    #[test]
    fn test_select_one_no_match_is_empty() {
        let db = setup();
        let values =
            Object::select_one(&db, SELECT_BY_ID, 1, |_| Value::Int64(99), &shapes()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_select_one_column_count_mismatch() {
        let db = setup();
        insert(&db, 1, b"a");

        let err = Object::select_one(
            &db,
            SELECT_BY_ID,
            1,
            |_| Value::Int64(1),
            &[Value::shape(ValueKind::Int64)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::ColumnCountMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_select_all() {
        let db = setup();
        for i in 0..3 {
            insert(&db, i, &[i as u8]);
        }

        let rows = Object::select_all(
            &db,
            "SELECT count, tag FROM item ORDER BY __id;",
            0,
            |_| Value::Null,
            &shapes(),
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![Value::Int64(2), Value::Bytes(vec![2])]);
    }

    #[test]
    fn test_update_table_counts_changes() {
        let db = setup();
        insert(&db, 1, b"a");
        insert(&db, 1, b"b");
        insert(&db, 2, b"c");

        let changed = Object::update_table(
            &db,
            "UPDATE item SET count = ? WHERE count = ?;",
            2,
            |position| Value::Int64(if position == 1 { 10 } else { 1 }),
        )
        .unwrap();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_insert_bind_error_surfaces() {
        let db = setup();
        let err = Object::insert_into_table(&db, INSERT, 3, |_| Value::Int64(1)).unwrap_err();
        assert!(matches!(err, DatabaseError::Bind { position: 3, .. }));
    }

    #[test]
    fn test_object_accessors() {
        let db = setup();
        let id = insert(&db, 5, b"x");
        let object = Object::new(&db, id);
        assert_eq!(object.id(), id);
        assert_eq!(object.database().path(), db.path());
    }
}
