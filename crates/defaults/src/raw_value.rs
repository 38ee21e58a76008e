use crate::{DecodeError, Preference, Value};

/// A type that can be converted to and from an associated raw value.
///
/// Raw-representable types are stored as their raw value. Reading a raw value that no
/// instance of the type maps to is a programming error, reported the same way as a shape
/// mismatch.
///
/// Fieldless enums can be declared together with their raw values using
/// [`raw_representable!`](crate::raw_representable).
///
/// # Example
/// ```rust
/// use defaults::{Preference, RawRepresentable, Value};
///
/// #[derive(Debug, PartialEq)]
/// enum Theme {
///     Light,
///     Dark,
/// }
///
/// impl RawRepresentable for Theme {
///     type RawValue = String;
///
///     fn from_raw_value(raw: String) -> Option<Self> {
///         match raw.as_str() {
///             "light" => Some(Theme::Light),
///             "dark" => Some(Theme::Dark),
///             _ => None,
///         }
///     }
///
///     fn raw_value(&self) -> String {
///         match self {
///             Theme::Light => "light".to_owned(),
///             Theme::Dark => "dark".to_owned(),
///         }
///     }
/// }
///
/// assert_eq!(Theme::Dark.encode(), Some(Value::from("dark")));
/// ```
pub trait RawRepresentable: Sized {
    /// The type stored in the database.
    type RawValue: Preference;

    /// Reconstruct an instance from its raw value, if any instance maps to it.
    fn from_raw_value(raw: Self::RawValue) -> Option<Self>;

    /// The raw value of this instance.
    fn raw_value(&self) -> Self::RawValue;
}

impl<R: RawRepresentable> Preference for R {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        let stored = object.clone();
        let raw = R::RawValue::decode(object)?;
        R::from_raw_value(raw).ok_or(DecodeError::UnknownRawValue {
            target: std::any::type_name::<R>(),
            raw: stored,
        })
    }

    fn encode(self) -> Option<Value> {
        self.raw_value().encode()
    }
}
