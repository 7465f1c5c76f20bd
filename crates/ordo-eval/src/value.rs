use serde::{Serialize, Serializer};
use std::fmt;

/// A resolved constant scalar.
///
/// Pure integer expressions resolve to `Int`; one float literal (or
/// float-valued reference) anywhere in an expression promotes the whole
/// expression to `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(value) => value as f64,
            Value::Float(value) => value,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            // Debug formatting keeps the decimal point on round floats
            Value::Float(value) => write!(f, "{value:?}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Value::Int(value) => serializer.serialize_i64(value),
            Value::Float(value) => serializer.serialize_f64(value),
        }
    }
}
