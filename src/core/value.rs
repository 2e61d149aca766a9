//! Values exchanged between generated entity code and the database
//!
//! A [`Value`] is used in two directions: as a bind value handed to a
//! statement, and as a shape describing the expected type of a result column.
//! Shapes are only inspected for their [`ValueKind`]; their payload is ignored.

use serde::{Deserialize, Serialize};

/// Database value that can hold one of the supported payload kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Binary data
    Bytes(Vec<u8>),
}

/// The tag of a [`Value`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Int32,
    Int64,
    Bytes,
}

impl ValueKind {
    /// Name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Bytes => "bytes",
        }
    }
}

impl Value {
    /// Build the placeholder used to describe a result column of `kind`
    pub fn shape(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Null => Value::Null,
            ValueKind::Int32 => Value::Int32(0),
            ValueKind::Int64 => Value::Int64(0),
            ValueKind::Bytes => Value::Bytes(Vec::new()),
        }
    }

    /// Get the tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the value as an i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            Value::Int64(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Get the value as an i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Get the value as bytes (zero-copy)
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Take the bytes out of the value
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
