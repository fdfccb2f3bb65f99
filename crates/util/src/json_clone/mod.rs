//! Deep cloning of JSON values and attribute maps.

mod clone;

pub use clone::{clone, clone_map};
