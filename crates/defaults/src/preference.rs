use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Shape, Value};

/// A type that can be read from and written to a defaults database.
///
/// Decoding is exact: an object is only accepted when its [`Shape`] is the one the type is
/// stored as. There is no coercion between integers, floats and strings.
///
/// `Option<T>` is a preference whenever `T` is. Encoding `None` yields no object, which
/// [`Defaults::set`](crate::Defaults::set) turns into removing the stored value.
///
/// Enum-like types should implement [`RawRepresentable`](crate::RawRepresentable) instead,
/// which provides this trait.
pub trait Preference: Sized {
    /// Interpret a stored object as `Self`.
    fn decode(object: Value) -> Result<Self, DecodeError>;

    /// The object to store for `self`, or `None` if the slot should be emptied.
    fn encode(self) -> Option<Value>;
}

/// A stored object cannot be interpreted as the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[allow(missing_docs)]
    #[error("expected: {expected}, actual: {actual}")]
    Mismatch { expected: Shape, actual: Shape },

    #[allow(missing_docs)]
    #[error("expected: array of {expected}, actual: {actual} at index {index}")]
    ElementMismatch {
        expected: Shape,
        actual: Shape,
        index: usize,
    },

    #[allow(missing_docs)]
    #[error("expected: {target}, actual: integer {value} out of range")]
    OutOfRange { target: &'static str, value: i64 },

    #[allow(missing_docs)]
    #[error("expected: {target}, actual: float {value:e} out of range")]
    FloatOutOfRange { target: &'static str, value: f64 },

    /// The raw value was decoded, but no case of the target type maps to it.
    #[allow(missing_docs)]
    #[error("expected: {target}, actual: raw value {raw:?} matching no case")]
    UnknownRawValue { target: &'static str, raw: Value },
}

impl DecodeError {
    pub(crate) fn mismatch(expected: Shape, actual: &Value) -> Self {
        DecodeError::Mismatch {
            expected,
            actual: actual.shape(),
        }
    }
}

macro_rules! impl_preference {
    ($ty:ty, $variant:ident) => {
        impl Preference for $ty {
            fn decode(object: Value) -> Result<Self, DecodeError> {
                match object {
                    Value::$variant(value) => Ok(value),
                    other => Err(DecodeError::mismatch(Shape::$variant, &other)),
                }
            }

            fn encode(self) -> Option<Value> {
                Some(Value::$variant(self))
            }
        }
    };
}

impl_preference!(String, String);
impl_preference!(bool, Bool);
impl_preference!(i64, Integer);
impl_preference!(f64, Float);
impl_preference!(Vec<u8>, Data);
impl_preference!(DateTime<Utc>, Date);
impl_preference!(Vec<Value>, Array);
impl_preference!(BTreeMap<String, Value>, Dictionary);

impl Preference for i32 {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        let value = i64::decode(object)?;
        i32::try_from(value).map_err(|_| DecodeError::OutOfRange {
            target: "i32",
            value,
        })
    }

    fn encode(self) -> Option<Value> {
        Some(Value::Integer(self.into()))
    }
}

impl Preference for f32 {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        let value = f64::decode(object)?;
        // NaN and infinities are representable; only finite values past f32::MAX are rejected.
        let narrowed = value as f32;
        if value.is_finite() && narrowed.is_infinite() {
            return Err(DecodeError::FloatOutOfRange {
                target: "f32",
                value,
            });
        }
        Ok(narrowed)
    }

    fn encode(self) -> Option<Value> {
        Some(Value::Float(self.into()))
    }
}

impl Preference for Vec<String> {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        Vec::<Value>::decode(object)?
            .into_iter()
            .enumerate()
            .map(|(index, element)| match element {
                Value::String(value) => Ok(value),
                other => Err(DecodeError::ElementMismatch {
                    expected: Shape::String,
                    actual: other.shape(),
                    index,
                }),
            })
            .collect()
    }

    fn encode(self) -> Option<Value> {
        Some(Value::Array(self.into_iter().map(Value::String).collect()))
    }
}

/// Any object, whatever its shape.
impl Preference for Value {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        Ok(object)
    }

    fn encode(self) -> Option<Value> {
        Some(self)
    }
}

impl<T: Preference> Preference for Option<T> {
    fn decode(object: Value) -> Result<Self, DecodeError> {
        T::decode(object).map(Some)
    }

    fn encode(self) -> Option<Value> {
        self.and_then(T::encode)
    }
}
