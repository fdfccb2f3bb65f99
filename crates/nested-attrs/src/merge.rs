//! Merging partial trees into live attribute trees.

use nested_attr_path::{check_index, Path, PathError, Seg, APPEND};
use nested_attrs_util::json_clone::clone;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::tree_builder::PartialTree;

/// One nested change produced by a merge or an unset.
///
/// `value` is `None` when the path was removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub path: Path,
    pub value: Option<Value>,
}

impl Change {
    /// Event name in the `change:<path>` form.
    pub fn event_name(&self) -> String {
        format!("change:{}", self.path)
    }
}

/// Receives a notification for every merged entry below the top level.
pub trait ChangeSink {
    fn record(&mut self, path: &Path, value: &Value);
}

impl ChangeSink for Vec<Change> {
    fn record(&mut self, path: &Path, value: &Value) {
        self.push(Change {
            path: path.clone(),
            value: Some(clone(value)),
        });
    }
}

/// Discards every notification.
impl ChangeSink for () {
    fn record(&mut self, _path: &Path, _value: &Value) {}
}

/// Merge `source` into `dest` in place.
///
/// `prefix` is the path of `dest` inside the whole tree and is only used to
/// report changes. Every entry whose full path has more than one segment is
/// recorded in `sink` after it has been resolved, nested entries before
/// their parents; top-level entries are left to the caller.
///
/// Resolution per entry:
/// - a container entry whose slot holds a compatible container merges into
///   it, keeping every sibling;
/// - the append marker resolves to the current length of the sequence;
/// - an index past the end pads the sequence with `null`;
/// - an object or array value landing on a container of the same kind
///   merges into it;
/// - anything else overwrites the slot.
///
/// A bare [`PartialTree::Leaf`] source is assigned to `dest` by the same rules.
///
/// # Errors
///
/// [`PathError::IndexOutOfBounds`] when an index lies further past the end
/// of its sequence than [`MAX_INDEX_PADDING`](nested_attr_path::MAX_INDEX_PADDING)
/// allows. Every index is checked before `dest` is touched.
///
/// # Example
///
/// ```
/// use nested_attrs::{build, merge, Change};
/// use nested_attr_path::{parse_path, Path};
/// use serde_json::json;
///
/// let mut dest = json!({"a": {"b": 1}});
/// let mut changes: Vec<Change> = Vec::new();
/// let source = build(&parse_path("a.c").unwrap(), json!(2)).unwrap();
/// merge(&mut dest, source, &Path::root(), &mut changes).unwrap();
///
/// assert_eq!(dest, json!({"a": {"b": 1, "c": 2}}));
/// assert_eq!(changes[0].path.to_string(), "a.c");
/// ```
pub fn merge<S: ChangeSink + ?Sized>(
    dest: &mut Value,
    source: PartialTree,
    prefix: &Path,
    sink: &mut S,
) -> Result<(), PathError> {
    check_bounds(Some(dest), &source)?;
    let mut path = prefix.clone();
    merge_into(dest, source, &mut path, sink);
    Ok(())
}

/// Merge `source` into a root attribute mapping.
///
/// The root is always a mapping, so a leading append marker has nowhere to
/// go and is skipped; callers reject such paths before building. Errors as
/// for [`merge`].
pub fn merge_attributes<S: ChangeSink + ?Sized>(
    attrs: &mut Map<String, Value>,
    source: PartialTree,
    sink: &mut S,
) -> Result<(), PathError> {
    match &source {
        PartialTree::Leaf(_) => {}
        PartialTree::Map { key, child } => check_bounds(attrs.get(key), child)?,
        PartialTree::Seq { index, child } => {
            if *index != APPEND {
                check_bounds(attrs.get(&index.to_string()), child)?;
            }
        }
    }

    let mut path = Path::root();
    match source {
        PartialTree::Leaf(_) => {}
        PartialTree::Map { key, child } => {
            let seg = Seg::Key(key.clone());
            merge_map_entry(attrs, key, seg, *child, &mut path, sink);
        }
        PartialTree::Seq { index, .. } if index == APPEND => {
            warn!("append marker cannot address the root mapping; entry skipped");
        }
        PartialTree::Seq { index, child } => {
            merge_map_entry(attrs, index.to_string(), Seg::Index(index), *child, &mut path, sink);
        }
    }
    Ok(())
}

/// Walk `source` alongside the slot it will land in and reject any index
/// that would pad too many `null`s.
fn check_bounds(mut slot: Option<&Value>, source: &PartialTree) -> Result<(), PathError> {
    let mut current = source;
    loop {
        match current {
            PartialTree::Leaf(_) => return Ok(()),
            PartialTree::Map { key, child } => {
                slot = match slot {
                    Some(Value::Object(map)) => map.get(key),
                    _ => None,
                };
                current = &**child;
            }
            PartialTree::Seq { index, child } => {
                slot = match slot {
                    Some(Value::Array(arr)) => {
                        check_index(*index, arr.len())?;
                        arr.get(*index)
                    }
                    Some(Value::Object(map)) if *index != APPEND => map.get(&index.to_string()),
                    _ => {
                        check_index(*index, 0)?;
                        None
                    }
                };
                current = &**child;
            }
        }
    }
}

fn merge_into<S: ChangeSink + ?Sized>(
    slot: &mut Value,
    source: PartialTree,
    path: &mut Path,
    sink: &mut S,
) {
    match source {
        PartialTree::Leaf(value) => merge_value(slot, value, path, sink),
        PartialTree::Map { key, child } => {
            let seg = Seg::Key(key.clone());
            if let Value::Object(map) = slot {
                merge_map_entry(map, key, seg, *child, path, sink);
            } else {
                note_overwrite(slot, path);
                let mut map = Map::new();
                merge_map_entry(&mut map, key, seg, *child, path, sink);
                *slot = Value::Object(map);
            }
        }
        PartialTree::Seq { index, child } => match slot {
            Value::Array(arr) => merge_seq_entry(arr, index, *child, path, sink),
            // Indices address decimal keys of an existing mapping.
            Value::Object(map) if index != APPEND => {
                merge_map_entry(map, index.to_string(), Seg::Index(index), *child, path, sink);
            }
            _ => {
                note_overwrite(slot, path);
                let mut arr = Vec::new();
                merge_seq_entry(&mut arr, index, *child, path, sink);
                *slot = Value::Array(arr);
            }
        },
    }
}

/// Assign a leaf value. Objects and arrays landing on a container of the
/// same kind merge into it entry by entry instead of replacing it.
fn merge_value<S: ChangeSink + ?Sized>(
    slot: &mut Value,
    value: Value,
    path: &mut Path,
    sink: &mut S,
) {
    match (slot, value) {
        (Value::Object(dest), Value::Object(src)) => {
            for (key, src_val) in src {
                let entry = dest.entry(key.clone()).or_insert(Value::Null);
                path.push(Seg::Key(key));
                merge_value(entry, src_val, path, sink);
                if path.len() > 1 {
                    sink.record(path, entry);
                }
                path.pop();
            }
        }
        (Value::Array(dest), Value::Array(src)) => {
            for (i, src_val) in src.into_iter().enumerate() {
                if i == dest.len() {
                    dest.push(Value::Null);
                }
                let entry = &mut dest[i];
                path.push(Seg::Index(i));
                merge_value(entry, src_val, path, sink);
                if path.len() > 1 {
                    sink.record(path, entry);
                }
                path.pop();
            }
        }
        (slot, value) => *slot = value,
    }
}

fn merge_map_entry<S: ChangeSink + ?Sized>(
    map: &mut Map<String, Value>,
    key: String,
    seg: Seg,
    child: PartialTree,
    path: &mut Path,
    sink: &mut S,
) {
    let slot = map.entry(key).or_insert(Value::Null);
    path.push(seg);
    merge_into(slot, child, path, sink);
    if path.len() > 1 {
        sink.record(path, slot);
    }
    path.pop();
}

fn merge_seq_entry<S: ChangeSink + ?Sized>(
    arr: &mut Vec<Value>,
    index: usize,
    child: PartialTree,
    path: &mut Path,
    sink: &mut S,
) {
    let position = if index == APPEND { arr.len() } else { index };
    if position >= arr.len() {
        arr.resize(position + 1, Value::Null);
    }
    let slot = &mut arr[position];
    path.push(Seg::Index(position));
    merge_into(slot, child, path, sink);
    if path.len() > 1 {
        sink.record(path, slot);
    }
    path.pop();
}

fn note_overwrite(slot: &Value, path: &Path) {
    match slot {
        Value::Null => {}
        Value::Object(_) | Value::Array(_) => {
            debug!(path = %path, "container kind changed, replacing");
        }
        _ => debug!(path = %path, "leaf on the path replaced by a container"),
    }
}
