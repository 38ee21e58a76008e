use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An object held by a defaults database.
///
/// Databases are untyped: the same identifier can hold a string today and an integer
/// tomorrow. Type information is recovered by the reader, which checks the [`Shape`] of the
/// stored object against the type it expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// A UTF-8 string.
    String(String),
    /// A boolean flag.
    Bool(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A double precision float. NaN and infinities are kept as is.
    Float(#[serde(with = "float")] f64),
    /// An opaque byte buffer.
    Data(Vec<u8>),
    /// A point in time, stored in UTC.
    Date(DateTime<Utc>),
    /// An ordered list of objects.
    Array(Vec<Value>),
    /// A string-keyed map of objects.
    Dictionary(BTreeMap<String, Value>),
}

/// The dynamic type of a [`Value`], used when reporting mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    #[allow(missing_docs)]
    String,
    #[allow(missing_docs)]
    Bool,
    #[allow(missing_docs)]
    Integer,
    #[allow(missing_docs)]
    Float,
    #[allow(missing_docs)]
    Data,
    #[allow(missing_docs)]
    Date,
    #[allow(missing_docs)]
    Array,
    #[allow(missing_docs)]
    Dictionary,
}

impl Value {
    /// Returns the dynamic type of this object.
    pub fn shape(&self) -> Shape {
        match self {
            Value::String(_) => Shape::String,
            Value::Bool(_) => Shape::Bool,
            Value::Integer(_) => Shape::Integer,
            Value::Float(_) => Shape::Float,
            Value::Data(_) => Shape::Data,
            Value::Date(_) => Shape::Date,
            Value::Array(_) => Shape::Array,
            Value::Dictionary(_) => Shape::Dictionary,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::String => "string",
            Shape::Bool => "bool",
            Shape::Integer => "integer",
            Shape::Float => "float",
            Shape::Data => "data",
            Shape::Date => "date",
            Shape::Array => "array",
            Shape::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

/// JSON has no representation for non-finite numbers, so those are written as strings.
mod float {
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "inf";
    const NEG_INFINITY: &str = "-inf";

    pub(super) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else if value.is_infinite() {
            serializer.serialize_str(NEG_INFINITY)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}
