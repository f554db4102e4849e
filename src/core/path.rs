//! Purpose: Resolve dotted attribute paths (`nodes.0.name`) against a reply tree.
//! Exports: `resolve`.
//! Role: Chained attribute access for callers that hold a path as text (CLI `get`).
//! Invariants: Object steps go through `Reply::get`, so errors match direct access.
use crate::core::error::{Error, ErrorKind};
use crate::core::reply::Reply;
use crate::core::value::Value;

pub fn resolve<'a>(root: &'a Reply, path: &str) -> Result<&'a Value, Error> {
    if path.is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument).with_message("empty attribute path"));
    }

    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();
    let mut current = step_reply(root, first, path)?;
    for segment in segments {
        current = step(current, segment, path)?;
    }
    Ok(current)
}

fn step<'a>(current: &'a Value, segment: &str, path: &str) -> Result<&'a Value, Error> {
    match current {
        Value::Reply(reply) => step_reply(reply, segment, path),
        Value::Array(items) => step_array(items, segment, path),
        Value::Primitive(primitive) => Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "cannot read `{segment}` from a {} value",
                primitive.kind_name()
            ))
            .with_attribute(path)),
    }
}

fn step_reply<'a>(reply: &'a Reply, segment: &str, path: &str) -> Result<&'a Value, Error> {
    if segment.is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument)
            .with_message("empty path segment")
            .with_attribute(path));
    }
    reply
        .get(segment)
        .map_err(|err| err.with_attribute(path))
}

fn step_array<'a>(items: &'a [Value], segment: &str, path: &str) -> Result<&'a Value, Error> {
    // `usize::from_str` also takes a leading `+`; indexes are plain digits.
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!("array index must be a number, got `{segment}`"))
            .with_attribute(path));
    }
    let out_of_bounds = || {
        Error::new(ErrorKind::IndexOutOfBounds)
            .with_message(format!("index {segment} out of bounds for length {}", items.len()))
            .with_attribute(path)
    };
    let index: usize = segment.parse().map_err(|_| out_of_bounds())?;
    items.get(index).ok_or_else(out_of_bounds)
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::core::error::ErrorKind;
    use crate::core::reply::Reply;

    fn tree() -> Reply {
        Reply::parse(r#"{"arr": [{"key1": true}, {"key2": false}], "ha": {"key1": "val1"}, "n": 1}"#)
            .expect("parse")
    }

    #[test]
    fn resolves_through_objects_and_arrays() {
        let tree = tree();
        assert_eq!(*resolve(&tree, "arr.0.key1").expect("arr.0.key1"), true);
        assert_eq!(*resolve(&tree, "arr.1.key2").expect("arr.1.key2"), false);
        assert_eq!(*resolve(&tree, "ha.key1").expect("ha.key1"), "val1");
    }

    #[test]
    fn missing_key_keeps_no_such_attribute_kind() {
        let err = resolve(&tree(), "ha.nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSuchAttribute);
        assert_eq!(err.attribute(), Some("ha.nope"));
    }

    #[test]
    fn index_errors_are_classified() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, "arr.5").unwrap_err().kind(),
            ErrorKind::IndexOutOfBounds
        );
        assert_eq!(
            resolve(&tree, "arr.first").unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            resolve(&tree, "n.value").unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn index_segments_are_plain_digits() {
        let tree = tree();
        for path in ["arr.+1", "arr.-0", "arr. 1"] {
            let err = resolve(&tree, path).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeMismatch, "path {path}");
            assert_eq!(err.attribute(), Some(path));
        }
        assert_eq!(
            resolve(&tree, "arr.99999999999999999999999").unwrap_err().kind(),
            ErrorKind::IndexOutOfBounds
        );
        assert!(resolve(&tree, "arr.01").is_ok());
    }

    #[test]
    fn empty_paths_are_invalid() {
        let tree = tree();
        assert_eq!(resolve(&tree, "").unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            resolve(&tree, "ha..key1").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
