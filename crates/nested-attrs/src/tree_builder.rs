//! Partial trees: the minimal skeleton describing a single path assignment.

use nested_attr_path::{check_index, PathError, Seg, APPEND};
use serde_json::{Map, Value};

/// A chain of single-entry containers ending in one leaf.
///
/// `a.b[2]` set to `7` is `Map("a") -> Map("b") -> Seq(2) -> Leaf(7)`. The
/// container kind of every level follows from its segment: keys build
/// mappings, indices (including [`APPEND`]) build sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialTree {
    Leaf(Value),
    Map { key: String, child: Box<PartialTree> },
    Seq { index: usize, child: Box<PartialTree> },
}

impl PartialTree {
    fn wrap(seg: &Seg, child: PartialTree) -> Self {
        let child = Box::new(child);
        match seg {
            Seg::Key(key) => PartialTree::Map {
                key: key.clone(),
                child,
            },
            Seg::Index(index) => PartialTree::Seq {
                index: *index,
                child,
            },
        }
    }

    /// Materialize as a plain JSON value.
    ///
    /// A sequence entry at index `n` becomes an array of `n + 1` elements
    /// with `null` in front of the child; the append marker becomes a
    /// one-element array.
    ///
    /// # Errors
    ///
    /// [`PathError::IndexOutOfBounds`] when an index would pad more `null`s
    /// than [`MAX_INDEX_PADDING`](nested_attr_path::MAX_INDEX_PADDING).
    pub fn into_value(self) -> Result<Value, PathError> {
        match self {
            PartialTree::Leaf(value) => Ok(value),
            PartialTree::Map { key, child } => {
                let mut map = Map::with_capacity(1);
                map.insert(key, child.into_value()?);
                Ok(Value::Object(map))
            }
            PartialTree::Seq { index, child } => {
                check_index(index, 0)?;
                let mut arr = if index == APPEND {
                    Vec::with_capacity(1)
                } else {
                    vec![Value::Null; index]
                };
                arr.push(child.into_value()?);
                Ok(Value::Array(arr))
            }
        }
    }
}

#[cfg(test)]
impl PartialTree {
    fn is_container(&self) -> bool {
        !matches!(self, PartialTree::Leaf(_))
    }

    /// The segment of this level's single entry.
    fn seg(&self) -> Option<Seg> {
        match self {
            PartialTree::Leaf(_) => None,
            PartialTree::Map { key, .. } => Some(Seg::Key(key.clone())),
            PartialTree::Seq { index, .. } => Some(Seg::Index(*index)),
        }
    }

    /// The value at the bottom of the chain.
    fn leaf(&self) -> &Value {
        let mut current = self;
        loop {
            match current {
                PartialTree::Leaf(value) => return value,
                PartialTree::Map { child, .. } | PartialTree::Seq { child, .. } => current = &**child,
            }
        }
    }
}

/// Build the partial tree for "set `value` at `path`".
///
/// # Errors
///
/// [`PathError::EmptyPath`] when `path` has no segments.
///
/// # Example
///
/// ```
/// use nested_attrs::{build, PartialTree};
/// use nested_attr_path::parse_path;
/// use serde_json::json;
///
/// let tree = build(&parse_path("a.b[1]").unwrap(), json!(5)).unwrap();
/// assert_eq!(tree.into_value().unwrap(), json!({"a": {"b": [null, 5]}}));
/// ```
pub fn build(path: &[Seg], value: Value) -> Result<PartialTree, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    Ok(path
        .iter()
        .rev()
        .fold(PartialTree::Leaf(value), |child, seg| PartialTree::wrap(seg, child)))
}
