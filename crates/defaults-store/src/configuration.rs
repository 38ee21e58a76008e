use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{validate_domain_name, Database, DatabaseError, MemoryDatabase, SqliteDatabase};

/// Selects the backend used for every domain opened by a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatabaseConfiguration {
    /// Values are kept in memory and lost when the process exits.
    #[default]
    Memory,

    /// Values are persisted with SQLite.
    Sqlite {
        /// The folder holding one `<domain>.sqlite` file per domain.
        folder_path: PathBuf,
    },
}

/// Opens the database for `domain` using the given configuration.
pub fn open_database(
    configuration: &DatabaseConfiguration,
    domain: &str,
) -> Result<Arc<dyn Database>, DatabaseError> {
    if !validate_domain_name(domain) {
        return Err(DatabaseError::InvalidDomain(domain.to_owned()));
    }

    let database: Arc<dyn Database> = match configuration {
        DatabaseConfiguration::Memory => Arc::new(MemoryDatabase::new(domain)),
        DatabaseConfiguration::Sqlite { folder_path } => {
            Arc::new(SqliteDatabase::open(folder_path, domain)?)
        }
    };
    Ok(database)
}
