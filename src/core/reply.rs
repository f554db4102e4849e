//! Purpose: Attribute-style projection of one JSON object reply.
//! Exports: `Reply`.
//! Role: Core read model for i3 IPC replies handed over by a transport as JSON text.
//! Invariants: Attribute order mirrors the source object; replies are immutable once built.
//! Invariants: `has` and `get` share one lookup so introspection never disagrees with access.
//! Invariants: A reply is a failure iff it carries an `error` attribute.
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::core::error::{Error, ErrorKind};
use crate::core::path;
use crate::core::text;
use crate::core::value::{Primitive, Value};
use crate::json::parse;

const ERROR_ATTRIBUTE: &str = "error";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reply {
    attributes: IndexMap<String, Value>,
}

impl Reply {
    /// Decodes `input` and projects its top-level object.
    ///
    /// Fails with [`ErrorKind::Parse`] for malformed JSON and
    /// [`ErrorKind::UnsupportedRoot`] when the document is not an object.
    pub fn parse(input: &str) -> Result<Self, Error> {
        trace!(bytes = input.len(), "decoding reply");
        let decoded: serde_json::Value = parse::from_str(input).map_err(|err| {
            debug!(error = %err, "reply decode failed");
            Error::new(ErrorKind::Parse)
                .with_message("reply is not valid JSON")
                .with_hint(parse::hint_for_error(&err, "reply"))
                .with_source(err)
        })?;
        Self::try_from(decoded)
    }

    /// Projects an already decoded mapping. Nested objects become replies.
    pub fn new(mapping: serde_json::Map<String, serde_json::Value>) -> Self {
        let attributes = mapping
            .into_iter()
            .map(|(name, value)| (name, Value::from_json(value)))
            .collect();
        Self { attributes }
    }

    pub fn get(&self, name: &str) -> Result<&Value, Error> {
        self.attributes.get(name).ok_or_else(|| {
            trace!(attribute = name, "attribute lookup missed");
            Error::no_such_attribute(name)
        })
    }

    /// Reads `name` as if it were invoked as an accessor method.
    ///
    /// Accessors take no parameters, so any argument is an
    /// [`ErrorKind::InvalidArgument`], reported before existence is checked.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<&Value, Error> {
        if !args.is_empty() {
            return Err(Error::new(ErrorKind::InvalidArgument)
                .with_message(format!(
                    "wrong number of arguments (given {}, expected 0)",
                    args.len()
                ))
                .with_attribute(name));
        }
        self.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn success(&self) -> bool {
        !self.has(ERROR_ATTRIBUTE)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.attributes.get(ERROR_ATTRIBUTE).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, Error> {
        self.typed(name, "boolean", Value::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, Error> {
        self.typed(name, "integer", Value::as_i64)
    }

    pub fn get_u64(&self, name: &str) -> Result<u64, Error> {
        self.typed(name, "unsigned integer", Value::as_u64)
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, Error> {
        self.typed(name, "float", Value::as_f64)
    }

    pub fn get_str(&self, name: &str) -> Result<&str, Error> {
        self.typed(name, "string", Value::as_str)
    }

    pub fn get_reply(&self, name: &str) -> Result<&Reply, Error> {
        self.typed(name, "object", Value::as_reply)
    }

    pub fn get_array(&self, name: &str) -> Result<&[Value], Error> {
        self.typed(name, "array", Value::as_array)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        read: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, Error> {
        let value = self.get(name)?;
        read(value).ok_or_else(|| {
            Error::new(ErrorKind::TypeMismatch)
                .with_message(format!("expected {expected}, found {}", value.kind_name()))
                .with_attribute(name)
        })
    }

    /// Resolves a dotted path such as `nodes.0.name`.
    ///
    /// Segments split on every `.`, so attribute names that contain a dot, and
    /// the empty name, cannot be addressed here; read those with [`Reply::get`].
    pub fn lookup(&self, path: &str) -> Result<&Value, Error> {
        path::resolve(self, path)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn to_mapping(&self) -> serde_json::Map<String, serde_json::Value> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }

    pub fn into_mapping(self) -> serde_json::Map<String, serde_json::Value> {
        self.attributes
            .into_iter()
            .map(|(name, value)| (name, into_json(value)))
            .collect()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.to_mapping())
    }

    pub fn to_text(&self) -> String {
        text::render_reply(self, false)
    }

    pub fn to_colored_text(&self) -> String {
        text::render_reply(self, true)
    }
}

fn into_json(value: Value) -> serde_json::Value {
    match value {
        Value::Primitive(Primitive::String(val)) => serde_json::Value::String(val),
        Value::Primitive(primitive) => primitive.to_json(),
        Value::Reply(reply) => serde_json::Value::Object(reply.into_mapping()),
        Value::Array(items) => serde_json::Value::Array(items.into_iter().map(into_json).collect()),
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Reply {
    fn from(mapping: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::new(mapping)
    }
}

impl TryFrom<serde_json::Value> for Reply {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(mapping) => {
                let reply = Self::new(mapping);
                debug!(attributes = reply.len(), success = reply.success(), "reply projected");
                Ok(reply)
            }
            other => {
                let found = Value::from_json(other).kind_name();
                Err(Error::new(ErrorKind::UnsupportedRoot)
                    .with_message(format!("reply root must be an object, found {found}")))
            }
        }
    }
}

impl FromStr for Reply {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (name, value) in &self.attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::Reply;
    use crate::core::error::ErrorKind;
    use crate::core::value::{Primitive, Value};
    use serde_json::json;

    fn reply(value: serde_json::Value) -> Reply {
        Reply::try_from(value).expect("object root")
    }

    #[test]
    fn call_without_args_reads_attribute() {
        let reply = reply(json!({"meth": "val"}));
        assert_eq!(*reply.call("meth", &[]).expect("meth"), "val");
    }

    #[test]
    fn call_with_args_is_invalid_argument_even_when_missing() {
        let reply = reply(json!({"meth": "val"}));
        let args = [Value::Primitive(Primitive::Int(0))];
        let err = reply.call("meth", &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.attribute(), Some("meth"));
        let err = reply.call("no_such_method", &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn typed_accessors_report_mismatch() {
        let reply = reply(json!({"num": 3, "name": "LVDS1", "rate": 59.9}));
        assert_eq!(reply.get_i64("num").expect("num"), 3);
        assert_eq!(reply.get_str("name").expect("name"), "LVDS1");
        assert_eq!(reply.get_f64("rate").expect("rate"), 59.9);

        let err = reply.get_f64("num").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.message(), Some("expected float, found integer"));

        let err = reply.get_bool("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSuchAttribute);
    }

    #[test]
    fn error_message_requires_string_error() {
        assert_eq!(
            reply(json!({"error": "Wrong command"})).error_message(),
            Some("Wrong command")
        );
        let coded = reply(json!({"error": 42}));
        assert!(!coded.success());
        assert_eq!(coded.error_message(), None);
    }

    #[test]
    fn attribute_names_follow_source_order() {
        let reply = Reply::parse(r#"{"z": 1, "a": 2, "m": 3}"#).expect("parse");
        let names: Vec<&str> = reply.attribute_names().collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(reply.len(), 3);
    }

    #[test]
    fn into_mapping_matches_to_mapping() {
        let source = json!({"f": 1, "inner": {"ar": [true, false, "v"]}, "x": null});
        let reply = reply(source.clone());
        let borrowed = reply.to_mapping();
        assert_eq!(reply.into_mapping(), borrowed);
        assert_eq!(serde_json::Value::Object(borrowed), source);
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let reply: Reply = r#"{"ok": true}"#.parse().expect("parse");
        assert!(reply.get_bool("ok").expect("ok"));
    }
}
