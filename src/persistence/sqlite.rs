use super::{PersistenceError, PersistenceResult, SlotStore};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteSlotStore {
    connection: Mutex<Connection>,
}

impl SqliteSlotStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> PersistenceResult<Option<String>> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        let mut stmt = conn.prepare("SELECT value_json FROM slots WHERE key = ?1")?;
        let json = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(json)
    }

    fn write_slot(&self, key: &str, json: &str) -> PersistenceResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO slots (key, value_json) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json",
            params![key, json],
        )?;
        Ok(())
    }
}
