//! Property-based tests for value binding and materialization using proptest

use proptest::prelude::*;
use rust_orm_runtime::prelude::*;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS Slot (__id INTEGER PRIMARY KEY NOT NULL, v ANY) STRICT;";
const INSERT: &str = "INSERT INTO Slot VALUES (NULL, ?);";
const SELECT: &str = "SELECT v FROM Slot WHERE __id = ?;";

fn store_and_load(value: Value) -> Result<Vec<Value>> {
    let db = SqliteDatabase::open_in_memory()?;
    Object::create_table_if_not_exists(&db, CREATE_TABLE)?;

    let shape = match value.kind() {
        // A null written in any column reads back as null whatever the shape.
        ValueKind::Null => Value::shape(ValueKind::Int64),
        kind => Value::shape(kind),
    };
    let id = Object::insert_into_table(&db, INSERT, 1, |_| value.clone())?;
    Object::select_one(&db, SELECT, 1, |_| Value::Int64(id as i64), &[shape])
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        prop::collection::vec(any::<u8>(), 0..512).prop_map(Value::Bytes),
    ]
}

proptest! {
    /// A value written with insert reads back equal with a matching shape
    #[test]
    fn test_value_survives_storage(value in any_value()) {
        let loaded = store_and_load(value.clone()).unwrap();
        prop_assert_eq!(loaded, vec![value]);
    }

    /// Inserted row ids are distinct and increasing
    #[test]
    fn test_row_ids_increase(count in 1usize..40) {
        let db = SqliteDatabase::open_in_memory().unwrap();
        Object::create_table_if_not_exists(&db, CREATE_TABLE).unwrap();

        let mut previous = 0u64;
        for i in 0..count {
            let id = Object::insert_into_table(&db, INSERT, 1, |_| Value::Int64(i as i64)).unwrap();
            prop_assert!(id > previous);
            prop_assert_eq!(id, db.last_insert_row_id());
            previous = id;
        }
    }

    /// Reads with the wrong number of shapes never yield a row
    #[test]
    fn test_shape_count_mismatch(extra in 1usize..6) {
        let db = SqliteDatabase::open_in_memory().unwrap();
        Object::create_table_if_not_exists(&db, CREATE_TABLE).unwrap();
        let id = Object::insert_into_table(&db, INSERT, 1, |_| Value::Int32(1)).unwrap();

        let shapes = vec![Value::shape(ValueKind::Int32); 1 + extra];
        let err = Object::select_one(&db, SELECT, 1, |_| Value::Int64(id as i64), &shapes).unwrap_err();
        prop_assert!(err.is_shape_mismatch());
    }

    /// The first failing bind position is the one reported
    #[test]
    fn test_first_bind_failure_reported(bind_count in 2usize..10) {
        let db = SqliteDatabase::open_in_memory().unwrap();
        Object::create_table_if_not_exists(&db, CREATE_TABLE).unwrap();

        let err = Object::insert_into_table(&db, INSERT, bind_count, |_| Value::Null).unwrap_err();
        let is_second_position = matches!(err, DatabaseError::Bind { position: 2, .. });
        prop_assert!(is_second_position);
    }
}

#[test]
fn test_null_round_trip_for_every_shape() {
    for kind in [ValueKind::Int32, ValueKind::Int64, ValueKind::Bytes] {
        let db = SqliteDatabase::open_in_memory().unwrap();
        Object::create_table_if_not_exists(&db, CREATE_TABLE).unwrap();
        let id = Object::insert_into_table(&db, INSERT, 1, |_| Value::Null).unwrap();

        let loaded =
            Object::select_one(&db, SELECT, 1, |_| Value::Int64(id as i64), &[Value::shape(kind)])
                .unwrap();
        assert_eq!(loaded, vec![Value::Null]);
    }
}
