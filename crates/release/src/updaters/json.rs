//! JSON helpers that keep a file's layout stable across rewrites.
//!
//! Key order is preserved (`serde_json` `preserve_order`), the indentation
//! unit is taken from the original text, and a trailing newline survives.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Parse a JSON document whose root must be an object.
pub(super) fn parse_object(content: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::manifest("Expected a JSON object at the top level", None)),
    }
}

/// Serialize `root` with the indentation and trailing newline of `original`.
pub(super) fn to_string_like(root: &Map<String, Value>, original: &str) -> Result<String> {
    let indent = detect_indent(original);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    root.serialize(&mut serializer)?;

    let mut out = String::from_utf8(buf)
        .map_err(|e| Error::manifest(format!("Serialized JSON is not UTF-8: {e}"), None))?;
    if original.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Indentation unit of the first indented line, defaulting to two spaces.
fn detect_indent(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect::<String>()
        })
        .find(|indent| !indent.is_empty())
        .unwrap_or_else(|| "  ".to_string())
}

/// Get a nested object, creating it when absent.
pub(super) fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| Error::manifest(format!("Expected `{key}` to be an object"), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_indent() {
        assert_eq!(detect_indent("{\n    \"a\": 1\n}"), "    ");
        assert_eq!(detect_indent("{\n\t\"a\": 1\n}"), "\t");
        assert_eq!(detect_indent("{\"a\": 1}"), "  ");
    }

    #[test]
    fn test_round_trip_preserves_order_and_newline() {
        let original = "{\n    \"name\": \"x\",\n    \"version\": \"1.0.0\",\n    \"a\": true\n}\n";
        let map = parse_object(original).unwrap();
        assert_eq!(to_string_like(&map, original).unwrap(), original);
    }

    #[test]
    fn test_no_trailing_newline_kept_absent() {
        let original = "{\n  \"b\": 1,\n  \"a\": 2\n}";
        let map = parse_object(original).unwrap();
        assert_eq!(to_string_like(&map, original).unwrap(), original);
    }

    #[test]
    fn test_parse_object_rejects_arrays() {
        assert!(parse_object("[1, 2]").unwrap_err().is_validation());
    }

    #[test]
    fn test_object_entry_rejects_scalars() {
        let mut map = parse_object("{\"ios\": 3}").unwrap();
        assert!(object_entry(&mut map, "ios").is_err());
        assert!(object_entry(&mut map, "android").is_ok());
    }
}
