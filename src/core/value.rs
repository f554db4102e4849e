//! Purpose: Tagged-union value tree produced by projecting decoded JSON.
//! Exports: `Value`, `Primitive`.
//! Role: Leaf and container kinds a `Reply` attribute can hold.
//! Invariants: JSON objects project to `Reply`, arrays to `Value::Array`, scalars to `Primitive`.
//! Invariants: Integer literals stay integers and float literals stay floats.
use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::core::reply::Reply;
use crate::core::text;

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Int(i64),
    /// Only for integers above `i64::MAX`.
    UInt(u64),
    /// Integer literal outside both `i64` and `u64`, kept as its exact digits.
    BigInt(String),
    Float(f64),
    String(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Primitive(Primitive),
    Reply(Reply),
    Array(Vec<Value>),
}

impl Primitive {
    fn from_number(number: &serde_json::Number) -> Self {
        if let Some(int) = number.as_i64() {
            Primitive::Int(int)
        } else if let Some(uint) = number.as_u64() {
            Primitive::UInt(uint)
        } else {
            // Decoded with `arbitrary_precision`, so `to_string` is the source literal.
            let literal = number.to_string();
            if literal.contains(['.', 'e', 'E']) {
                let float = number
                    .as_f64()
                    .or_else(|| literal.parse().ok())
                    .unwrap_or(f64::NAN);
                Primitive::Float(float)
            } else {
                Primitive::BigInt(literal)
            }
        }
    }

    fn big_int_number(digits: &str) -> Option<serde_json::Number> {
        serde_json::from_str(digits).ok()
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Bool(_) => "boolean",
            Primitive::Int(_) | Primitive::UInt(_) | Primitive::BigInt(_) => "integer",
            Primitive::Float(_) => "float",
            Primitive::String(_) => "string",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Primitive::Null => serde_json::Value::Null,
            Primitive::Bool(val) => serde_json::Value::Bool(*val),
            Primitive::Int(val) => serde_json::Value::from(*val),
            Primitive::UInt(val) => serde_json::Value::from(*val),
            Primitive::BigInt(digits) => Primitive::big_int_number(digits)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(digits.clone())),
            // Literals beyond f64 range (`1e400`) decode as infinity and map to null.
            Primitive::Float(val) => serde_json::Number::from_f64(*val)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Primitive::String(val) => serde_json::Value::String(val.clone()),
        }
    }
}

impl Value {
    /// Projects a decoded JSON value, wrapping every object as a `Reply`.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Primitive(Primitive::Null),
            serde_json::Value::Bool(val) => Value::Primitive(Primitive::Bool(val)),
            serde_json::Value::Number(num) => Value::Primitive(Primitive::from_number(&num)),
            serde_json::Value::String(val) => Value::Primitive(Primitive::String(val)),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Reply(Reply::new(map)),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Primitive(primitive) => primitive.to_json(),
            Value::Reply(reply) => serde_json::Value::Object(reply.to_mapping()),
            Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Primitive(primitive) => primitive.kind_name(),
            Value::Reply(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Primitive(Primitive::Null))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Primitive(Primitive::Bool(val)) => Some(*val),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Primitive(Primitive::Int(val)) => Some(*val),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Primitive(Primitive::Int(val)) => u64::try_from(*val).ok(),
            Value::Primitive(Primitive::UInt(val)) => Some(*val),
            _ => None,
        }
    }

    /// Exact digits of an integer too wide for `i64` and `u64`.
    pub fn as_big_int(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::BigInt(digits)) => Some(digits),
            _ => None,
        }
    }

    /// Float-typed values only; integers are not widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Primitive(Primitive::Float(val)) => Some(*val),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::String(val)) => Some(val),
            _ => None,
        }
    }

    pub fn as_reply(&self) -> Option<&Reply> {
        match self {
            Value::Reply(reply) => Some(reply),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_text(&self) -> String {
        text::render(self, false)
    }

    pub fn to_colored_text(&self) -> String {
        text::render(self, true)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from_json(value)
    }
}

impl From<Primitive> for Value {
    fn from(primitive: Primitive) -> Self {
        Value::Primitive(primitive)
    }
}

impl From<Reply> for Value {
    fn from(reply: Reply) -> Self {
        Value::Reply(reply)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Primitive(Primitive::Null) => serializer.serialize_unit(),
            Value::Primitive(Primitive::Bool(val)) => serializer.serialize_bool(*val),
            Value::Primitive(Primitive::Int(val)) => serializer.serialize_i64(*val),
            Value::Primitive(Primitive::UInt(val)) => serializer.serialize_u64(*val),
            Value::Primitive(Primitive::BigInt(digits)) => match Primitive::big_int_number(digits) {
                Some(number) => number.serialize(serializer),
                None => serializer.serialize_str(digits),
            },
            Value::Primitive(Primitive::Float(val)) => serializer.serialize_f64(*val),
            Value::Primitive(Primitive::String(val)) => serializer.serialize_str(val),
            Value::Reply(reply) => reply.serialize(serializer),
            Value::Array(items) => serializer.collect_seq(items),
        }
    }
}
