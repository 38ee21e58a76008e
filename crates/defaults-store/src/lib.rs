#![doc = include_str!("../README.md")]

/// The dynamically typed object model stored by every backend.
pub mod value;

/// The database interface implemented by every backend.
pub mod database;

mod configuration;
mod memory;
mod sqlite;

pub use configuration::{open_database, DatabaseConfiguration};
pub use database::{validate_domain_name, Database, DatabaseError};
pub use memory::MemoryDatabase;
pub use sqlite::SqliteDatabase;
pub use value::{Shape, Value};
