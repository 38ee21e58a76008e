use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, RwLock},
};

use defaults_store::{open_database, validate_domain_name};
use log::{debug, warn};
use thiserror::Error;

use crate::{Database, DatabaseError, Defaults, DefaultsConfiguration};

/// Domain reserved for values shared by every application. It cannot be opened as a suite.
pub const GLOBAL_DOMAIN: &str = "global";

static GLOBAL: OnceLock<DatabaseRegistry> = OnceLock::new();
// Serializes initialization of `GLOBAL`, so `configure` never opens a backend it then drops.
static INIT: Mutex<()> = Mutex::new(());

/// A registry owning the standard database and every suite opened through it.
///
/// Opening the same suite twice yields the same database, so every facade for that suite
/// observes the writes of the others.
pub struct DatabaseRegistry {
    configuration: DefaultsConfiguration,
    standard: Arc<dyn Database>,
    suites: RwLock<HashMap<String, Arc<dyn Database>>>,
}

impl std::fmt::Debug for DatabaseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseRegistry")
            .field("configuration", &self.configuration)
            .finish()
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Suite name {0:?} is not a valid domain name")]
    InvalidName(String),

    #[error("Suite name {0:?} is reserved")]
    Reserved(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("The process-wide defaults registry is already initialized")]
    AlreadyConfigured,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl DatabaseRegistry {
    /// Opens a registry, opening its standard database immediately.
    pub fn open(configuration: DefaultsConfiguration) -> Result<Self, DatabaseError> {
        let standard = open_database(&configuration.database, configuration.standard_domain())?;
        debug!(
            "Opened standard defaults database {:?}",
            configuration.standard_domain()
        );

        Ok(DatabaseRegistry {
            configuration,
            standard,
            suites: RwLock::new(HashMap::new()),
        })
    }

    /// A registry with the default configuration, keeping every value in memory.
    pub fn in_memory() -> Self {
        let configuration = DefaultsConfiguration::default();
        let standard = Arc::new(crate::MemoryDatabase::new(configuration.standard_domain()));
        DatabaseRegistry {
            configuration,
            standard,
            suites: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by [`Defaults::standard`] and [`Defaults::suite`].
    ///
    /// Unless [`configure`] was called first, it is created in memory on first use.
    pub fn global() -> &'static DatabaseRegistry {
        if let Some(registry) = GLOBAL.get() {
            return registry;
        }

        let _guard = INIT.lock().expect("Mutex should not be poisoned");
        GLOBAL.get_or_init(DatabaseRegistry::in_memory)
    }

    /// The configuration this registry was opened with.
    pub fn configuration(&self) -> &DefaultsConfiguration {
        &self.configuration
    }

    /// A facade bound to the standard database.
    pub fn standard(&self) -> Defaults {
        Defaults::with_database(Arc::clone(&self.standard))
    }

    /// A facade bound to the suite named `name`, or `None` if the suite cannot be opened.
    ///
    /// The reason is logged; use [`open_suite`](Self::open_suite) to handle it instead.
    pub fn suite(&self, name: &str) -> Option<Defaults> {
        match self.open_suite(name) {
            Ok(database) => Some(Defaults::with_database(database)),
            Err(e) => {
                warn!("Cannot open defaults suite {name:?}: {e}");
                None
            }
        }
    }

    /// Opens, or returns the already opened, database of the suite named `name`.
    ///
    /// Names must be valid domain names (see [`validate_domain_name`]) and must differ from
    /// [`GLOBAL_DOMAIN`] and from the standard database's domain.
    pub fn open_suite(&self, name: &str) -> Result<Arc<dyn Database>, SuiteError> {
        validate_suite_name(name, self.configuration.standard_domain())?;

        if let Some(database) = self
            .suites
            .read()
            .expect("RwLock should not be poisoned")
            .get(name)
        {
            return Ok(Arc::clone(database));
        }

        let mut suites = self.suites.write().expect("RwLock should not be poisoned");
        // Another thread may have opened it between the two locks.
        if let Some(database) = suites.get(name) {
            return Ok(Arc::clone(database));
        }

        let database = open_database(&self.configuration.database, name)?;
        debug!("Opened defaults suite {name:?}");
        suites.insert(name.to_owned(), Arc::clone(&database));
        Ok(database)
    }
}

impl Default for DatabaseRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Initialize the process-wide registry with `configuration`.
///
/// Must be called before the first use of [`Defaults::standard`] or [`Defaults::suite`];
/// afterwards the registry is fixed and this returns [`ConfigureError::AlreadyConfigured`].
///
/// Calls racing with the first use of the registry are ordered: whichever runs first decides
/// the registry, and the backend is only opened by a call that is certain to install it. A
/// losing `configure` therefore leaves no database files behind. If opening the backend
/// fails, the registry stays uninitialized and `configure` may be called again.
pub fn configure(configuration: DefaultsConfiguration) -> Result<(), ConfigureError> {
    let _guard = INIT.lock().expect("Mutex should not be poisoned");
    if GLOBAL.get().is_some() {
        return Err(ConfigureError::AlreadyConfigured);
    }

    let registry = DatabaseRegistry::open(configuration)?;
    GLOBAL
        .set(registry)
        .map_err(|_| ConfigureError::AlreadyConfigured)
}

fn validate_suite_name(name: &str, standard_domain: &str) -> Result<(), SuiteError> {
    if !validate_domain_name(name) {
        return Err(SuiteError::InvalidName(name.to_owned()));
    }
    if name == GLOBAL_DOMAIN || name == standard_domain {
        return Err(SuiteError::Reserved(name.to_owned()));
    }
    Ok(())
}
