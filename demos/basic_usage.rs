//! Basic runtime usage example
//!
//! This example drives the runtime the way generated entity code does:
//! - Opening (or creating) a store
//! - Creating a table and an index
//! - Inserting rows
//! - Reading a row back by row id
//! - Updating a row
//!
//! Run with: RUST_LOG=trace cargo run --example basic_usage

use rust_orm_runtime::prelude::*;
use tracing_subscriber::EnvFilter;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS Player (__id INTEGER PRIMARY KEY NOT NULL, level INTEGER NOT NULL DEFAULT 0, guild INTEGER DEFAULT NULL, avatar BLOB) STRICT;";
const CREATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS Player_level ON Player (level);";
const INSERT: &str = "INSERT INTO Player VALUES (NULL, ?, ?, ?);";
const SELECT: &str = "SELECT level, guild, avatar FROM Player WHERE __id = ?;";
const UPDATE_LEVEL: &str = "UPDATE Player SET level = ? WHERE __id = ?;";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ORM Runtime - Basic Usage Example ===\n");

    let dir = std::env::temp_dir().join("rust_orm_runtime_demo");
    std::fs::create_dir_all(&dir).map_err(|e| DatabaseError::open(&dir, e))?;
    let path = dir.join("players.db");

    println!("1. Opening {}...", path.display());
    let db = SqliteDatabase::open_or_create(&path)?;
    println!("   ✓ Opened\n");

    println!("2. Creating table and index...");
    Object::create_table_if_not_exists(&db, CREATE_TABLE)?;
    Object::create_index_if_not_exists(&db, CREATE_INDEX)?;
    println!("   ✓ Schema ready\n");

    println!("3. Inserting players...");
    let players: Vec<(i32, Option<i64>, Vec<u8>)> = vec![
        (1, None, vec![0x89, 0x50]),
        (12, Some(7), vec![0xFF, 0xD8]),
        (30, Some(7), vec![]),
    ];
    let mut ids = Vec::new();
    for (level, guild, avatar) in players {
        let id = Object::insert_into_table(&db, INSERT, 3, |position| match position {
            1 => Value::from(level),
            2 => Value::from(guild),
            _ => Value::from(avatar.clone()),
        })?;
        println!("   ✓ Inserted player #{}", id);
        ids.push(id);
    }
    println!();

    let shapes = [
        Value::shape(ValueKind::Int32),
        Value::shape(ValueKind::Int64),
        Value::shape(ValueKind::Bytes),
    ];

    println!("4. Reading players back...");
    for id in &ids {
        let row = Object::select_one(&db, SELECT, 1, |_| Value::Int64(*id as i64), &shapes)?;
        println!("   - Player #{}: {:?}", id, row);
    }
    println!();

    println!("5. Levelling up the first player...");
    let first = ids[0] as i64;
    let changed = Object::update_table(&db, UPDATE_LEVEL, 2, |position| match position {
        1 => Value::Int32(2),
        _ => Value::Int64(first),
    })?;
    println!("   ✓ Updated {} row(s)\n", changed);

    println!("6. Closing...");
    db.close()?;
    println!("   ✓ Closed");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
