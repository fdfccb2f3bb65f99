//! Path-addressed access to nested JSON attribute trees.
//!
//! An attribute tree is a JSON object whose values may themselves be
//! objects, arrays, or scalars. Any position in it is named by a path such
//! as `a.b[2].c`; `list[]` names the slot one past the end of `list`.
//!
//! - [`build`] turns one path and value into a [`PartialTree`].
//! - [`merge`] folds a partial tree into a live tree and reports each nested
//!   entry it touched to a [`ChangeSink`].
//! - [`NestedAttributes`] adds `get`/`has`/`set`/`unset`/`to_snapshot` to any
//!   [`AttributeHost`]; [`Model`] is a ready-made host with change events.
//!
//! # Example
//!
//! ```
//! use nested_attrs::{Model, ModelEvent, NestedAttributes, SetOptions};
//! use serde_json::json;
//!
//! let mut model = Model::from_value(json!({"user": {"name": "ada"}})).unwrap();
//! model.set_one("user.tags[]", "admin", &SetOptions::default()).unwrap();
//!
//! assert_eq!(
//!     serde_json::Value::Object(model.to_snapshot()),
//!     json!({"user": {"name": "ada", "tags": ["admin"]}})
//! );
//! let names: Vec<String> = model.drain_events().iter().map(ModelEvent::name).collect();
//! assert_eq!(names, ["change:user", "change:user.tags[0]", "change:user.tags", "change"]);
//! ```

pub mod accessor;
pub mod json_cli;
pub mod merge;
pub mod model;
pub mod tree_builder;

pub use accessor::{AttributeHost, Attributes, NestedAttributes, SetOptions};
pub use merge::{merge, merge_attributes, Change, ChangeSink};
pub use model::{Model, ModelEvent};
pub use tree_builder::{build, PartialTree};

pub use nested_attr_path::{format_path, parse_path, IntoPath, Path, PathError, Seg, APPEND};
