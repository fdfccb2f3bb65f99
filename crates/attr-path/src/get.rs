use serde_json::{Map, Value};

use crate::types::Seg;

/// Get a value from a JSON tree by path.
///
/// Returns `None` when any step is missing. The append marker never
/// resolves, and a key never addresses an array element.
pub fn get<'a>(val: &'a Value, path: &[Seg]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(step.as_index()?)?,
            Value::Object(map) => map.get(&*step.as_object_key()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON tree by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[Seg]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(step.as_index()?)?,
            Value::Object(map) => map.get_mut(&*step.as_object_key()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Like [`get`], starting from a root mapping.
///
/// The root itself is not a `Value`, so the empty path resolves to `None`.
pub fn get_in<'a>(root: &'a Map<String, Value>, path: &[Seg]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let child = root.get(&*first.as_object_key()?)?;
    get(child, rest)
}

/// Like [`get_mut`], starting from a root mapping.
pub fn get_in_mut<'a>(root: &'a mut Map<String, Value>, path: &[Seg]) -> Option<&'a mut Value> {
    let (first, rest) = path.split_first()?;
    let child = root.get_mut(&*first.as_object_key()?)?;
    get_mut(child, rest)
}
