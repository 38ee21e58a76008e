use std::{path::Path, sync::Mutex};

use rusqlite::{params, OptionalExtension};

use crate::{validate_domain_name, Database, DatabaseError, Value};

/// A database persisted in `<folder>/<domain>.sqlite`.
///
/// Objects are stored as JSON text in a single `defaults` table. Every write runs in its own
/// transaction.
#[derive(Debug)]
pub struct SqliteDatabase {
    domain: String,
    connection: Mutex<rusqlite::Connection>,
}

impl SqliteDatabase {
    /// Opens, creating if needed, the database file for `domain` inside `folder_path`.
    pub fn open(folder_path: &Path, domain: &str) -> Result<Self, DatabaseError> {
        if !validate_domain_name(domain) {
            return Err(DatabaseError::InvalidDomain(domain.to_owned()));
        }

        std::fs::create_dir_all(folder_path)?;
        let path = folder_path.join(format!("{domain}.sqlite"));

        let connection = rusqlite::Connection::open(&path)?;

        // Set WAL mode so several processes can share a domain
        connection.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS defaults (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;

        log::debug!("Opened defaults database {}", path.display());

        Ok(SqliteDatabase {
            domain: domain.to_owned(),
            connection: Mutex::new(connection),
        })
    }
}

impl Database for SqliteDatabase {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn get(&self, key: &str) -> Result<Option<Value>, DatabaseError> {
        let conn = self.connection.lock().expect("Mutex should not be poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM defaults WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), DatabaseError> {
        let value = serde_json::to_string(&value)?;

        let mut conn = self.connection.lock().expect("Mutex should not be poisoned");
        let transaction = conn.transaction()?;
        transaction.execute(
            "INSERT OR REPLACE INTO defaults (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        transaction.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        let mut conn = self.connection.lock().expect("Mutex should not be poisoned");
        let transaction = conn.transaction()?;
        transaction.execute("DELETE FROM defaults WHERE key = ?1", params![key])?;
        transaction.commit()?;
        Ok(())
    }

    fn identifiers(&self) -> Result<Vec<String>, DatabaseError> {
        let conn = self.connection.lock().expect("Mutex should not be poisoned");
        let mut stmt = conn.prepare("SELECT key FROM defaults ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool, DatabaseError> {
        let conn = self.connection.lock().expect("Mutex should not be poisoned");
        let found = conn
            .query_row(
                "SELECT 1 FROM defaults WHERE key = ?1",
                params![key],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
