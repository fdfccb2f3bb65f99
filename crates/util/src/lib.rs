//! nested-attrs-util - JSON tree helpers shared by the nested-attrs crates.

pub mod json_clone;
pub mod json_merge;

// Re-exports for convenience
pub use json_clone::{clone, clone_map};
pub use json_merge::{deep_merge, deep_merge_map};
