use std::{collections::HashMap, sync::RwLock};

use crate::{Database, DatabaseError, Value};

/// A database that lives for the duration of the process.
#[derive(Debug)]
pub struct MemoryDatabase {
    domain: String,
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryDatabase {
    /// Creates an empty database for `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Database for MemoryDatabase {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn get(&self, key: &str) -> Result<Option<Value>, DatabaseError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), DatabaseError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .remove(key);
        Ok(())
    }

    fn identifiers(&self) -> Result<Vec<String>, DatabaseError> {
        let mut keys: Vec<String> = self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .contains_key(key))
    }
}
