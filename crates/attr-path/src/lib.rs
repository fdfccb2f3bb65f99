//! Attribute path utilities.
//!
//! Paths address values inside nested JSON trees using a compact syntax:
//! `a.b[2].c` walks key `a`, key `b`, index `2`, key `c`. An empty bracket
//! pair (`list[]`) is the append marker, meaning "one past the end of the
//! sequence".
//!
//! # Example
//!
//! ```
//! use nested_attr_path::{parse_path, format_path, get_in, Seg};
//!
//! let path = parse_path("a.b[2].c").unwrap();
//! assert_eq!(
//!     path.segments(),
//!     &[Seg::key("a"), Seg::key("b"), Seg::index(2), Seg::key("c")]
//! );
//! assert_eq!(format_path(&path), "a.b[2].c");
//!
//! let doc = serde_json::json!({"a": {"b": [0, 1, {"c": 42}]}});
//! let root = doc.as_object().unwrap();
//! assert_eq!(get_in(root, &path), Some(&serde_json::json!(42)));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, Seg, APPEND};

pub mod validate;
pub use validate::{check_index, validate_path, MAX_INDEX_PADDING, MAX_PATH_LENGTH};

mod get;
mod util;

pub use get::{get, get_in, get_in_mut, get_mut};
pub use util::{format_path, is_child, is_integer, is_root, parent, parse_path, IntoPath};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("INVALID_PATH: no attributes in {0:?}")]
    InvalidPath(String),
    #[error("EMPTY_PATH")]
    EmptyPath,
    #[error("APPEND_AT_ROOT: the root is a mapping, not a sequence")]
    AppendAtRoot,
    #[error("NO_PARENT")]
    NoParent,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
    #[error("INDEX_OUT_OF_BOUNDS: index {index} is too far past the end of a sequence of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> Seg {
        Seg::key(k)
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("a").unwrap().segments(), &[key("a")]);
        assert_eq!(
            parse_path("a.b[2].c").unwrap().segments(),
            &[key("a"), key("b"), Seg::index(2), key("c")]
        );

        // Append marker
        assert_eq!(
            parse_path("list[]").unwrap().segments(),
            &[key("list"), Seg::append()]
        );
        assert_eq!(
            parse_path("a[].b").unwrap().segments(),
            &[key("a"), Seg::append(), key("b")]
        );

        // Digits after a dot are indices too
        assert_eq!(
            parse_path("a.0.b").unwrap().segments(),
            &[key("a"), Seg::index(0), key("b")]
        );
    }

    #[test]
    fn test_parse_path_discards_empty_tokens() {
        assert_eq!(parse_path("..a..b.").unwrap().segments(), &[key("a"), key("b")]);
        assert_eq!(
            parse_path("[a][0]").unwrap().segments(),
            &[key("a"), Seg::index(0)]
        );
    }

    #[test]
    fn test_parse_path_mixed_tokens() {
        assert_eq!(parse_path("a1").unwrap().segments(), &[key("a1")]);
        assert_eq!(parse_path("-1").unwrap().segments(), &[key("-1")]);
        assert_eq!(parse_path("007").unwrap().segments(), &[Seg::index(7)]);
        assert_eq!(parse_path("café.ü").unwrap().segments(), &[key("café"), key("ü")]);
    }

    #[test]
    fn test_parse_path_overflowing_index_stays_key() {
        let big = "99999999999999999999999999";
        assert_eq!(parse_path(big).unwrap().segments(), &[key(big)]);
    }

    #[test]
    fn test_parse_path_errors() {
        assert_eq!(parse_path(""), Err(PathError::InvalidPath(String::new())));
        assert!(matches!(parse_path("..."), Err(PathError::InvalidPath(_))));
        assert!(matches!(parse_path("[.]"), Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_into_path_passes_segments_through() {
        let segs = vec![key("a"), Seg::index(3)];
        assert_eq!(segs.clone().into_path().unwrap().segments(), segs.as_slice());

        let path = Path::root().key("x").append();
        assert_eq!((&path).into_path().unwrap(), path);

        // No re-parsing of keys that look like indices
        let literal = [key("0")];
        assert_eq!(literal.into_path().unwrap().segments(), &[key("0")]);
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "");
        assert_eq!(format_path(&[key("a")]), "a");
        assert_eq!(format_path(&[key("a"), key("b")]), "a.b");
        assert_eq!(format_path(&[key("a"), Seg::index(0), key("b")]), "a[0].b");
        assert_eq!(format_path(&[key("list"), Seg::append()]), "list[]");
        assert_eq!(format_path(&[Seg::index(1), key("x")]), "[1].x");
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for s in ["a", "a.b", "a[0]", "a.b[2].c", "list[]", "x[0][1].y"] {
            assert_eq!(format_path(&parse_path(s).unwrap()), s, "roundtrip for {s:?}");
        }
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(&[]));
        assert!(!is_root(&[key("foo")]));
    }

    #[test]
    fn test_is_child() {
        let parent_path = [key("foo")];
        let child = [key("foo"), key("bar")];
        let sibling = [key("baz")];

        assert!(is_child(&parent_path, &child));
        assert!(!is_child(&child, &parent_path));
        assert!(!is_child(&parent_path, &sibling));
        assert!(!is_child(&parent_path, &parent_path));
    }

    #[test]
    fn test_parent() {
        let path = [key("foo"), Seg::index(1)];
        assert_eq!(parent(&path).unwrap().segments(), &[key("foo")]);
        assert!(parent(&[key("foo")]).unwrap().is_empty());
        assert_eq!(parent(&[]), Err(PathError::NoParent));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer("0"));
        assert!(is_integer("123"));
        assert!(is_integer("01"));
        assert!(!is_integer("-1"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer(""));
        assert!(!is_integer("abc"));
    }

    #[test]
    fn test_get_nested() {
        let doc = json!({"foo": {"bar": {"baz": "qux"}}});
        assert_eq!(
            get(&doc, &[key("foo"), key("bar"), key("baz")]),
            Some(&json!("qux"))
        );
        assert_eq!(get(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_array_element() {
        let doc = json!([1, 2, 3]);
        assert_eq!(get(&doc, &[Seg::index(1)]), Some(&json!(2)));
        assert_eq!(get(&doc, &[Seg::index(3)]), None);
        assert_eq!(get(&doc, &[Seg::append()]), None);
        assert_eq!(get(&doc, &[key("length")]), None);
    }

    #[test]
    fn test_get_index_on_object_uses_decimal_key() {
        let doc = json!({"2": "two"});
        assert_eq!(get(&doc, &[Seg::index(2)]), Some(&json!("two")));
    }

    #[test]
    fn test_get_through_leaf() {
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, &[key("a"), key("b")]), None);
    }

    #[test]
    fn test_get_explicit_null() {
        let doc = json!({"foo": null});
        assert_eq!(get(&doc, &[key("foo")]), Some(&serde_json::Value::Null));
        assert_eq!(get(&doc, &[key("bar")]), None);
    }

    #[test]
    fn test_get_mut() {
        let mut doc = json!({"a": {"b": [1, 2]}});
        *get_mut(&mut doc, &[key("a"), key("b"), Seg::index(0)]).unwrap() = json!(10);
        assert_eq!(doc, json!({"a": {"b": [10, 2]}}));
        assert!(get_mut(&mut doc, &[key("a"), key("missing")]).is_none());
    }

    #[test]
    fn test_get_in_root_mapping() {
        let doc = json!({"a": {"b": 1}});
        let root = doc.as_object().unwrap();
        assert_eq!(get_in(root, &[key("a"), key("b")]), Some(&json!(1)));
        assert_eq!(get_in(root, &[]), None);
        assert_eq!(get_in(root, &[Seg::append()]), None);
    }

    #[test]
    fn test_get_in_mut_root_mapping() {
        let mut doc = json!({"a": {"b": 1}});
        let root = doc.as_object_mut().unwrap();
        *get_in_mut(root, &[key("a"), key("b")]).unwrap() = json!(2);
        assert_eq!(doc, json!({"a": {"b": 2}}));
    }
}
