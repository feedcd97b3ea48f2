pub mod errors;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::manager_db::errors::DBError;

/// Key-value store keeping json documents in sqlite
pub struct Store {
    db_conn: Connection,
}

impl Store {

    /// Creates a new instance of Store
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, or ":memory:" for a transient store
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
           "CREATE TABLE IF NOT EXISTS kv (
                key text not null primary key,
                value text not null
           )",
           [],
        )?;

        Ok(Store { db_conn })
    }

    /// Returns the value stored under the given key, or None if there is none
    ///
    /// # Arguments
    ///
    /// * 'key' - key to look up
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DBError> {
        let mut stmt = self.db_conn.prepare(
            "SELECT value FROM kv WHERE key = ?1;",
        )?;

        let response: rusqlite::Result<String> = stmt.query_one(params![key], |row| row.get(0));
        match response {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DBError::from(e)),
        }
    }

    /// Stores a value under the given key, replacing any previous value
    ///
    /// # Arguments
    ///
    /// * 'key' - key to store under
    /// * 'value' - value to serialize into json
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DBError> {
        let json = serde_json::to_string(value)?;

        self.db_conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, json],
        )?;

        Ok(())
    }

    /// Removes the given key, doing nothing if it does not exist
    ///
    /// # Arguments
    ///
    /// * 'key' - key to remove
    pub fn delete(&self, key: &str) -> Result<(), DBError> {
        self.db_conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;

        Ok(())
    }
}
