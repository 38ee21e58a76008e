use thiserror::Error;

use crate::Value;

/// An error resulting from operations on a database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The domain name cannot be used to address a database.
    #[error("Invalid domain name: {0:?}")]
    InvalidDomain(String),

    /// The database folder could not be created.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[allow(missing_docs)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    #[allow(missing_docs)]
    Internal(#[from] rusqlite::Error),
}

/// A key-value database holding dynamically typed objects.
///
/// Implementations must be safe to share across threads. Writes are visible to every
/// holder of the same database as soon as the call returns; no operation is atomic with
/// respect to any other.
pub trait Database: Send + Sync {
    /// The domain this database was opened for.
    fn domain(&self) -> &str;

    /// Retrieves the object stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, DatabaseError>;

    /// Stores `value` under `key`, replacing any previous object.
    fn set(&self, key: &str, value: Value) -> Result<(), DatabaseError>;

    /// Removes the object stored under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<(), DatabaseError>;

    /// Lists every key that currently holds an object, in ascending order.
    fn identifiers(&self) -> Result<Vec<String>, DatabaseError>;

    /// Returns whether an object is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool, DatabaseError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Validate that the provided name can address a database on every backend.
///
/// Valid names are non-empty and contain only `a-z`, `A-Z`, `0-9`, `.`, `-` and `_`. They
/// may not consist solely of dots, since SQLite databases use the name as a file name.
pub const fn validate_domain_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let mut only_dots = true;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if !(byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-' || byte == b'_') {
            return false;
        }
        if byte != b'.' {
            only_dots = false;
        }
        i += 1;
    }
    !only_dots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_name() {
        assert!(validate_domain_name("standard"));
        assert!(validate_domain_name("com.example.app"));
        assert!(validate_domain_name("group_2-shared"));
        assert!(!validate_domain_name(""));
        assert!(!validate_domain_name("."));
        assert!(!validate_domain_name(".."));
        assert!(!validate_domain_name("with space"));
        assert!(!validate_domain_name("nested/path"));
        assert!(!validate_domain_name("back\\slash"));
    }
}
