#![doc = include_str!("../README.md")]

mod access;
mod configuration;
mod key;
mod keys;
mod macros;
mod preference;
mod raw_value;

/// The registry of databases backing [`Defaults`] facades.
pub mod registry;

pub use access::Defaults;
pub use configuration::DefaultsConfiguration;
pub use defaults_store::{
    Database, DatabaseConfiguration, DatabaseError, MemoryDatabase, Shape, SqliteDatabase, Value,
};
pub use key::Key;
pub use keys::Keys;
pub use preference::{DecodeError, Preference};
pub use raw_value::RawRepresentable;
pub use registry::{configure, ConfigureError, DatabaseRegistry, SuiteError};
