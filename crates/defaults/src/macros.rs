/// Declare a set of keys together with typed accessors on [`Defaults`](crate::Defaults).
///
/// The macro generates two traits:
/// - the first is implemented for [`Keys`](crate::Keys) and returns a fresh
///   [`Key`](crate::Key) per declaration,
/// - the second is implemented for [`Defaults`](crate::Defaults) and exposes a getter, a
///   setter and a remover per declaration.
///
/// Each declaration names the getter, setter and remover, followed by the value type and the
/// expression building the key.
///
/// # Example
/// ```rust
/// use defaults::{keys, Defaults, Key, Keys};
///
/// keys! {
///     /// Settings of the example application.
///     pub trait AppKeys, AppDefaults {
///         /// Indicates whether memory saver is enabled.
///         memory_saver, set_memory_saver, remove_memory_saver: bool =
///             Key::new("memory_saver", false);
///     }
/// }
///
/// assert_eq!(Keys.memory_saver().identifier(), "memory_saver");
///
/// let defaults = Defaults::with_database(std::sync::Arc::new(
///     defaults::MemoryDatabase::new("example"),
/// ));
/// defaults.set_memory_saver(true);
/// assert!(defaults.memory_saver());
/// defaults.remove_memory_saver();
/// assert!(!defaults.memory_saver());
/// ```
#[macro_export]
macro_rules! keys {
    (
        $(#[$trait_meta:meta])*
        $vis:vis trait $keys_trait:ident, $defaults_trait:ident {
            $(
                $(#[$meta:meta])*
                $name:ident, $setter:ident, $remover:ident: $ty:ty = $key:expr;
            )*
        }
    ) => {
        $(#[$trait_meta])*
        $vis trait $keys_trait {
            $(
                $(#[$meta])*
                fn $name(&self) -> $crate::Key<$ty>;
            )*
        }

        impl $keys_trait for $crate::Keys {
            $(
                fn $name(&self) -> $crate::Key<$ty> {
                    $key
                }
            )*
        }

        #[doc = concat!("Typed accessors for the keys of [`", stringify!($keys_trait), "`].")]
        $vis trait $defaults_trait {
            $(
                $(#[$meta])*
                fn $name(&self) -> $ty;

                #[doc = concat!("Writes `", stringify!($name), "`.")]
                fn $setter(&self, value: $ty);

                #[doc = concat!("Removes `", stringify!($name), "`, resetting it to its default.")]
                fn $remover(&self);
            )*
        }

        impl $defaults_trait for $crate::Defaults {
            $(
                fn $name(&self) -> $ty {
                    self.get(&<$crate::Keys as $keys_trait>::$name(&$crate::Keys))
                }

                fn $setter(&self, value: $ty) {
                    self.set(&<$crate::Keys as $keys_trait>::$name(&$crate::Keys), value)
                }

                fn $remover(&self) {
                    self.remove(&<$crate::Keys as $keys_trait>::$name(&$crate::Keys))
                }
            )*
        }
    };
}

/// Declare a fieldless enum stored as a raw value.
///
/// Every case is paired with the raw value it is stored as. Values are converted with
/// `From`, so string literals work for `String` raw types.
///
/// # Example
/// ```rust
/// use defaults::{raw_representable, RawRepresentable};
///
/// raw_representable! {
///     /// Appearance of the application.
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Theme: String {
///         Light = "light",
///         Dark = "dark",
///     }
/// }
///
/// assert_eq!(Theme::Dark.raw_value(), "dark");
/// assert_eq!(Theme::from_raw_value("light".to_owned()), Some(Theme::Light));
/// assert_eq!(Theme::from_raw_value("sepia".to_owned()), None);
/// ```
#[macro_export]
macro_rules! raw_representable {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $raw:ty {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::RawRepresentable for $name {
            type RawValue = $raw;

            fn from_raw_value(raw: $raw) -> ::std::option::Option<Self> {
                $(
                    if raw == <$raw as ::std::convert::From<_>>::from($value) {
                        return ::std::option::Option::Some(Self::$variant);
                    }
                )*
                ::std::option::Option::None
            }

            fn raw_value(&self) -> $raw {
                match self {
                    $(
                        Self::$variant => <$raw as ::std::convert::From<_>>::from($value),
                    )*
                }
            }
        }
    };
}
