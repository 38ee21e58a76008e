/// A collection of [`Key`](crate::Key)s.
///
/// `Keys` holds no data. To declare a key, add a method to it through an extension trait,
/// either by hand or with the [`keys!`](crate::keys) macro:
///
/// ```rust
/// use defaults::{Key, Keys};
///
/// trait AppKeys {
///     /// Indicates whether memory saver is enabled.
///     fn memory_saver(&self) -> Key<bool>;
/// }
///
/// impl AppKeys for Keys {
///     fn memory_saver(&self) -> Key<bool> {
///         Key::new("memory_saver", false)
///     }
/// }
///
/// assert_eq!(Keys.memory_saver().identifier(), "memory_saver");
/// ```
///
/// Every call builds a fresh key, so declaring the same identifier in two places yields two
/// independent keys that share storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys;
