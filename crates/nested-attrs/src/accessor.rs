//! Path-addressed access to a host's attribute tree.

use nested_attr_path::{get_in, get_in_mut, validate_path, IntoPath, Path, PathError, Seg};
use nested_attrs_util::json_clone::clone_map;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::merge::{merge_attributes, Change};
use crate::tree_builder::{build, PartialTree};

/// The root of an attribute tree.
pub type Attributes = Map<String, Value>;

/// Options accepted by [`NestedAttributes::set`] and [`NestedAttributes::unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOptions {
    /// Suppress every per-path and aggregate change notification.
    pub silent: bool,
}

impl SetOptions {
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// The model that owns an attribute tree.
///
/// The host stores the attributes and decides how notifications travel;
/// [`NestedAttributes`] computes every nested change on top of it.
pub trait AttributeHost {
    fn attributes(&self) -> &Attributes;

    /// Swap in a new tree and report changed top-level attributes.
    fn replace_attributes(&mut self, attrs: Attributes, options: &SetOptions);

    /// Remove one top-level attribute.
    fn unset_attribute(&mut self, key: &str, options: &SetOptions);

    /// A nested path changed. `None` means it was removed.
    fn path_changed(&mut self, path: &str, value: Option<&Value>);

    /// Fired once per `set`/`unset` call after all other notifications.
    fn attributes_changed(&mut self, options: &SetOptions);
}

/// `get`/`has`/`set`/`unset` by path, for every [`AttributeHost`].
///
/// # Example
///
/// ```
/// use nested_attrs::{Model, NestedAttributes, SetOptions};
/// use serde_json::json;
///
/// let mut model = Model::new();
/// model.set([("a.b", json!(1)), ("a.c", json!(2))], &SetOptions::default()).unwrap();
/// model.set_one("tags[]", json!("x"), &SetOptions::default()).unwrap();
///
/// assert_eq!(model.get("a.c").unwrap(), Some(&json!(2)));
/// assert_eq!(model.to_snapshot()["tags"], json!(["x"]));
///
/// model.unset("a.b", &SetOptions::default()).unwrap();
/// assert!(!model.has("a.b").unwrap());
/// ```
pub trait NestedAttributes: AttributeHost {
    /// Look up the value at `path`.
    ///
    /// `Ok(None)` when the path does not resolve, which is distinct from a
    /// stored `null`. The result borrows the live tree; change it through
    /// [`set`](Self::set).
    fn get<P: IntoPath>(&self, path: P) -> Result<Option<&Value>, PathError> {
        let path = path.into_path()?;
        let found = get_in(self.attributes(), &path);
        if let Some(Value::Object(_) | Value::Array(_)) = found {
            debug!(path = %path, "read a whole container; address its leaves by path to track changes");
        }
        Ok(found)
    }

    /// True when `path` resolves to a value other than `null`.
    fn has<P: IntoPath>(&self, path: P) -> Result<bool, PathError> {
        Ok(!matches!(self.get(path)?, None | Some(Value::Null)))
    }

    /// Assign every `(path, value)` entry in one batch.
    ///
    /// All paths are parsed and checked before anything changes. The merged
    /// tree is handed to the host in one swap, then each nested change is
    /// reported, then one aggregate notification fires. An index too far
    /// past the end of its sequence fails the whole batch and leaves the
    /// host untouched.
    fn set<I, P>(&mut self, entries: I, options: &SetOptions) -> Result<&Attributes, PathError>
    where
        I: IntoIterator<Item = (P, Value)>,
        P: IntoPath,
    {
        let trees = entries
            .into_iter()
            .map(|(path, value)| partial_tree(path.into_path()?, value))
            .collect::<Result<Vec<_>, _>>()?;

        let mut working = clone_map(self.attributes());
        let mut changes: Vec<Change> = Vec::new();
        let count = trees.len();
        for tree in trees {
            if options.silent {
                merge_attributes(&mut working, tree, &mut ())?;
            } else {
                merge_attributes(&mut working, tree, &mut changes)?;
            }
        }
        debug!(entries = count, nested_changes = changes.len(), silent = options.silent, "set");

        self.replace_attributes(working, options);
        if !options.silent {
            for change in &changes {
                trace!(path = %change.path, "path changed");
                self.path_changed(&change.path.to_string(), change.value.as_ref());
            }
            self.attributes_changed(options);
        }
        Ok(self.attributes())
    }

    /// [`set`](Self::set) with a single entry.
    fn set_one<P: IntoPath>(
        &mut self,
        path: P,
        value: impl Into<Value>,
        options: &SetOptions,
    ) -> Result<&Attributes, PathError> {
        self.set([(path, value.into())], options)
    }

    /// Remove the value at `path`.
    ///
    /// A single-segment path is delegated to the host. Longer paths remove
    /// the last segment from its parent container, if the parent holds it;
    /// removing from a sequence shifts the later elements down. The
    /// aggregate notification fires either way unless silent.
    fn unset<P: IntoPath>(&mut self, path: P, options: &SetOptions) -> Result<(), PathError> {
        let path = path.into_path()?;
        validate_path(&path)?;
        let Some((last, parent_path)) = path.split_last() else {
            return Err(PathError::EmptyPath);
        };

        if parent_path.is_empty() {
            let key = last.as_object_key().ok_or(PathError::AppendAtRoot)?;
            self.unset_attribute(&key, options);
        } else {
            let mut working = clone_map(self.attributes());
            let removed = get_in_mut(&mut working, parent_path)
                .and_then(|parent| remove_entry(parent, last));
            match removed {
                Some(_) => {
                    debug!(path = %path, "unset");
                    self.replace_attributes(working, options);
                    if !options.silent {
                        self.path_changed(&path.to_string(), None);
                    }
                }
                None => debug!(path = %path, "unset of a missing path"),
            }
        }

        if !options.silent {
            self.attributes_changed(options);
        }
        Ok(())
    }

    /// An independent deep copy of the whole tree.
    fn to_snapshot(&self) -> Attributes {
        clone_map(self.attributes())
    }
}

impl<H: AttributeHost> NestedAttributes for H {}

fn partial_tree(path: Path, value: Value) -> Result<PartialTree, PathError> {
    validate_path(&path)?;
    if path[0].is_append() {
        return Err(PathError::AppendAtRoot);
    }
    build(&path, value)
}

fn remove_entry(parent: &mut Value, seg: &Seg) -> Option<Value> {
    match parent {
        Value::Object(map) => map.shift_remove(&*seg.as_object_key()?),
        Value::Array(arr) => {
            let idx = seg.as_index()?;
            (idx < arr.len()).then(|| arr.remove(idx))
        }
        _ => None,
    }
}
