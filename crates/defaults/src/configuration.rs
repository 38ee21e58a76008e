use serde::{Deserialize, Serialize};

use crate::DatabaseConfiguration;

/// Domain of the standard database when no application id is configured.
pub(crate) const STANDARD_DOMAIN: &str = "standard";

/// Settings for a [`DatabaseRegistry`](crate::DatabaseRegistry). They cannot be changed once
/// the registry is opened.
///
/// Defaults to
///
/// ```
/// # use defaults::{DatabaseConfiguration, DefaultsConfiguration};
/// let configuration = DefaultsConfiguration {
///     application_id: None,
///     database: DatabaseConfiguration::Memory,
/// };
/// assert_eq!(configuration, DefaultsConfiguration::default());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DefaultsConfiguration {
    /// Identifies the application, for example `com.example.app`. The standard database is
    /// stored under this domain, which therefore cannot be opened as a suite. Defaults to
    /// `standard` when unset.
    pub application_id: Option<String>,
    /// Backend used for the standard database and every suite. Defaults to in-memory storage.
    pub database: DatabaseConfiguration,
}

impl DefaultsConfiguration {
    /// The domain of the standard database.
    pub fn standard_domain(&self) -> &str {
        self.application_id.as_deref().unwrap_or(STANDARD_DOMAIN)
    }
}
