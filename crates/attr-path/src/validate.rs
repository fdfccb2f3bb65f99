//! Validation functions for attribute paths.

use crate::types::{Seg, APPEND};
use crate::PathError;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// How many `null`s an index past the end of a sequence may pad in.
pub const MAX_INDEX_PADDING: usize = 1024;

/// Validate a parsed path before it is used to build or remove anything.
///
/// # Errors
///
/// - [`PathError::EmptyPath`] when the path has no segments
/// - [`PathError::PathTooLong`] when the path exceeds [`MAX_PATH_LENGTH`] segments
///
/// # Example
///
/// ```
/// use nested_attr_path::{parse_path, validate_path};
///
/// validate_path(&parse_path("a.b[0]").unwrap()).unwrap();
/// validate_path(&[]).unwrap_err();
/// ```
pub fn validate_path(path: &[Seg]) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(())
}

/// Check that writing at `index` into a sequence of `len` elements stays
/// within [`MAX_INDEX_PADDING`] of its end.
///
/// The append marker always fits.
///
/// # Example
///
/// ```
/// use nested_attr_path::{check_index, PathError, MAX_INDEX_PADDING};
///
/// check_index(3, 1).unwrap();
/// assert_eq!(
///     check_index(usize::MAX - 1, 1),
///     Err(PathError::IndexOutOfBounds { index: usize::MAX - 1, len: 1 })
/// );
/// assert!(check_index(MAX_INDEX_PADDING + 1, 0).is_err());
/// ```
pub fn check_index(index: usize, len: usize) -> Result<(), PathError> {
    if index == APPEND || index <= len.saturating_add(MAX_INDEX_PADDING) {
        Ok(())
    } else {
        Err(PathError::IndexOutOfBounds { index, len })
    }
}
