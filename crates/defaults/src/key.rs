//! Type-safe keys for defaults lookup.

use std::borrow::Cow;

/// A key for defaults lookup.
///
/// Associates a string identifier with a value type and the value returned when nothing is
/// stored under that identifier.
///
/// Keys are usually declared as methods on [`Keys`](crate::Keys), see the [`keys!`](crate::keys)
/// macro.
///
/// # Identifier uniqueness
///
/// Identifiers are not checked for uniqueness. Two keys created with the same identifier
/// address the same stored value, and each falls back to its own default when that value is
/// absent. Reading the value through a key of a different type panics.
///
/// # Example
/// ```rust
/// use defaults::Key;
///
/// let memory_saver = Key::new("memory_saver", false);
/// assert_eq!(memory_saver.identifier(), "memory_saver");
///
/// let password: Key<Option<String>> = Key::optional("password");
/// assert_eq!(password.default_value(), &None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Key<T> {
    identifier: Cow<'static, str>,
    default_value: T,
}

impl<T> Key<T> {
    /// Create a key that resolves to `default_value` when nothing is stored under
    /// `identifier`.
    pub fn new(identifier: impl Into<Cow<'static, str>>, default_value: T) -> Self {
        Self {
            identifier: identifier.into(),
            default_value,
        }
    }

    /// The identifier used for storage.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The value returned when nothing is stored.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }
}

impl<T> Key<Option<T>> {
    /// Create an optional key, whose default is `None`.
    pub fn optional(identifier: impl Into<Cow<'static, str>>) -> Self {
        Self::new(identifier, None)
    }
}
