use std::{fmt, sync::Arc};

use log::error;

use crate::{Database, DatabaseError, DatabaseRegistry, DecodeError, Key, Preference, Value};

/// A type-safe wrapper around a defaults database.
///
/// Values are addressed with [`Key`]s. Reading a key that holds nothing returns the key's
/// default; writing `None` through an optional key deletes the stored value.
///
/// # Example
/// ```rust
/// use defaults::{Defaults, Key};
///
/// let password: Key<Option<String>> = Key::optional("doc_password");
/// let defaults = Defaults::standard();
///
/// assert_eq!(defaults.get(&password), None);
///
/// defaults.set(&password, Some("123456".to_owned()));
/// assert_eq!(defaults.get(&password), Some("123456".to_owned()));
///
/// defaults.set(&password, None);
/// assert!(!defaults.contains(&password));
/// ```
///
/// # Panics
///
/// Every accessor panics when the stored value cannot be interpreted as the key's type, or
/// when the database itself fails. Both indicate a broken program rather than a condition to
/// recover from: the former means two parts of the program declared conflicting keys for one
/// identifier.
#[derive(Clone)]
pub struct Defaults {
    database: Arc<dyn Database>,
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("domain", &self.database.domain())
            .finish()
    }
}

impl Defaults {
    /// The facade bound to the process-wide default database.
    pub fn standard() -> Defaults {
        DatabaseRegistry::global().standard()
    }

    /// The facade bound to the process-wide suite named `name`.
    ///
    /// Returns `None` if `name` cannot be used as a suite, see [`DatabaseRegistry::suite`].
    pub fn suite(name: &str) -> Option<Defaults> {
        DatabaseRegistry::global().suite(name)
    }

    /// Bind a facade to an arbitrary database.
    pub fn with_database(database: Arc<dyn Database>) -> Self {
        Self { database }
    }

    /// The domain of the underlying database.
    pub fn domain(&self) -> &str {
        self.database.domain()
    }

    /// Read the value of `key`, falling back to its default when nothing is stored.
    pub fn get<T: Preference + Clone>(&self, key: &Key<T>) -> T {
        match self.load(key) {
            Ok(value) => value,
            Err(e) => type_mismatch(key.identifier(), e),
        }
    }

    /// Write `value` for `key`.
    ///
    /// For optional keys, writing `None` removes the stored value, exactly like
    /// [`remove`](Self::remove).
    pub fn set<T: Preference>(&self, key: &Key<T>, value: T) {
        let identifier = key.identifier();
        let result = match value.encode() {
            Some(object) => self.database.set(identifier, object),
            None => self.database.remove(identifier),
        };

        if let Err(e) = result {
            database_failure(identifier, e);
        }
    }

    /// Remove the value stored for `key`, resetting it to its default.
    ///
    /// Any other key sharing the identifier is reset to its own default.
    pub fn remove<T>(&self, key: &Key<T>) {
        if let Err(e) = self.database.remove(key.identifier()) {
            database_failure(key.identifier(), e);
        }
    }

    /// Whether a value is stored for `key`.
    pub fn contains<T>(&self, key: &Key<T>) -> bool {
        self.database
            .contains(key.identifier())
            .unwrap_or_else(|e| database_failure(key.identifier(), e))
    }

    fn load<T: Preference + Clone>(&self, key: &Key<T>) -> Result<T, DecodeError> {
        match self.object(key.identifier()) {
            Some(object) => T::decode(object),
            None => Ok(key.default_value().clone()),
        }
    }

    fn object(&self, identifier: &str) -> Option<Value> {
        self.database
            .get(identifier)
            .unwrap_or_else(|e| database_failure(identifier, e))
    }
}

fn type_mismatch(identifier: &str, error: DecodeError) -> ! {
    error!("Type associated with {identifier:?} mismatch: {error}");
    panic!("Type associated with \"{identifier}\" mismatch; {error}.")
}

fn database_failure(identifier: &str, error: DatabaseError) -> ! {
    error!("Defaults database failed for {identifier:?}: {error}");
    panic!("Defaults database failed for \"{identifier}\": {error}")
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::Path};

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{MemoryDatabase, Shape, SqliteDatabase};

    fn defaults() -> Defaults {
        Defaults::with_database(Arc::new(MemoryDatabase::new("test")))
    }

    fn sqlite_defaults(folder: &Path) -> Defaults {
        Defaults::with_database(Arc::new(
            SqliteDatabase::open(folder, "round_trip").unwrap(),
        ))
    }

    /// Writes `value` through one connection and reads it back through a fresh one.
    fn persisted<T: Preference + Clone>(folder: &Path, key: &Key<T>, value: T) -> T {
        sqlite_defaults(folder).set(key, value);
        sqlite_defaults(folder).get(key)
    }

    crate::raw_representable! {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Layout: String {
            Grid = "grid",
            List = "list",
        }
    }

    #[test]
    fn test_unset_key_returns_default() {
        let defaults = defaults();
        assert_eq!(defaults.get(&Key::new("count", 3_i64)), 3);
        assert_eq!(defaults.get(&Key::<Option<String>>::optional("name")), None);
    }

    #[test]
    fn test_set_then_get() {
        let defaults = defaults();
        let key = Key::new("ratio", 0.5);
        defaults.set(&key, 0.75);
        assert_eq!(defaults.get(&key), 0.75);
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let defaults = defaults();
        let key = Key::new("tags", Vec::<String>::new());
        defaults.set(&key, vec!["a".to_owned()]);
        defaults.set(&key, vec!["b".to_owned(), "c".to_owned()]);
        assert_eq!(defaults.get(&key), vec!["b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn test_optional_none_deletes_slot() {
        let database = Arc::new(MemoryDatabase::new("test"));
        let defaults = Defaults::with_database(database.clone());
        let key: Key<Option<i64>> = Key::optional("limit");

        defaults.set(&key, Some(10));
        assert_eq!(database.get("limit").unwrap(), Some(Value::Integer(10)));

        defaults.set(&key, None);
        assert_eq!(database.get("limit").unwrap(), None);
        assert!(!defaults.contains(&key));
    }

    #[test]
    fn test_optional_key_with_explicit_default() {
        let defaults = defaults();
        let key = Key::new("nickname", Some("anonymous".to_owned()));
        assert_eq!(defaults.get(&key), Some("anonymous".to_owned()));

        defaults.set(&key, None);
        // The slot is empty again, so the declared default applies.
        assert_eq!(defaults.get(&key), Some("anonymous".to_owned()));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let defaults = defaults();
        let key = Key::new("never_set", true);
        defaults.remove(&key);
        assert!(defaults.get(&key));
    }

    #[test]
    fn test_dictionary_values() {
        let defaults = defaults();
        let key = Key::new("window", BTreeMap::new());
        let frame = BTreeMap::from([
            ("x".to_owned(), Value::Integer(10)),
            ("y".to_owned(), Value::Integer(20)),
        ]);
        defaults.set(&key, frame.clone());
        assert_eq!(defaults.get(&key), frame);
    }

    #[test]
    fn test_any_value_reads_whatever_is_stored() {
        let defaults = defaults();
        defaults.set(&Key::new("mixed", 0_i64), 5);
        let any = Key::new("mixed", Value::Bool(false));
        assert_eq!(defaults.get(&any), Value::Integer(5));
        assert_eq!(defaults.get(&any).shape(), Shape::Integer);
    }

    #[test]
    #[should_panic(expected = "Type associated with \"enabled\" mismatch; expected: bool, actual: string.")]
    fn test_mismatch_is_fatal() {
        let defaults = defaults();
        defaults.set(&Key::new("enabled", String::new()), "yes".to_owned());
        defaults.get(&Key::new("enabled", false));
    }

    #[test]
    #[should_panic(expected = "Type associated with \"enabled\" mismatch")]
    fn test_optional_mismatch_is_fatal() {
        let defaults = defaults();
        defaults.set(&Key::new("enabled", 0_i64), 1);
        defaults.get(&Key::<Option<bool>>::optional("enabled"));
    }

    #[test]
    fn test_debug_shows_domain() {
        assert_eq!(format!("{:?}", defaults()), "Defaults { domain: \"test\" }");
    }

    #[test]
    fn test_every_preference_type_survives_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path();

        macro_rules! assert_persists {
            ($($identifier:literal: $default:expr => $value:expr;)*) => {
                $(
                    let value = $value;
                    assert_eq!(
                        persisted(folder, &Key::new($identifier, $default), value.clone()),
                        value,
                        "{}",
                        $identifier
                    );
                )*
            };
        }

        let date = DateTime::parse_from_rfc3339("2024-02-29T23:59:58.123456789Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_persists! {
            "bool": false => true;
            "i64": 0_i64 => i64::MIN;
            "i32": 0_i32 => -42_i32;
            "f64": 0.0_f64 => -1024.125_f64;
            "f64_fraction": 0.0_f64 => 0.1_f64;
            "f32": 0.0_f32 => 3.25_f32;
            "string": String::new() => "caf\u{e9} \u{1f600}".to_owned();
            "data": Vec::<u8>::new() => vec![0_u8, 255, 7];
            "date": DateTime::<Utc>::default() => date;
            "strings": Vec::<String>::new() => vec!["a".to_owned(), String::new()];
            "array": Vec::<Value>::new() => vec![Value::Integer(1), Value::from("two")];
            "dictionary": BTreeMap::new() => BTreeMap::from([
                ("nested".to_owned(), Value::Array(vec![Value::Float(0.5)])),
                ("flag".to_owned(), Value::Bool(true)),
            ]);
            "value": Value::Bool(false) => Value::Data(vec![1, 2, 3]);
            "optional": None::<String> => Some("set".to_owned());
            "layout": Layout::Grid => Layout::List;
            "optional_layout": None::<Layout> => Some(Layout::Grid);
        }

        assert_eq!(
            persisted(folder, &Key::new("infinity", 0.0_f64), f64::INFINITY),
            f64::INFINITY
        );
        assert_eq!(
            persisted(folder, &Key::new("neg_infinity", 0.0_f64), f64::NEG_INFINITY),
            f64::NEG_INFINITY
        );
        assert!(persisted(folder, &Key::new("nan", 0.0_f64), f64::NAN).is_nan());
        assert_eq!(
            persisted(folder, &Key::new("f32_infinity", 0.0_f32), f32::INFINITY),
            f32::INFINITY
        );

        // Writing `None` removes the row, so a reopened database reads the default again.
        let optional = Key::new("optional", None::<String>);
        assert_eq!(persisted(folder, &optional, None), None);
        assert!(!sqlite_defaults(folder).contains(&optional));
    }
}
