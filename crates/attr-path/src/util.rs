use crate::types::{Path, Seg, APPEND};
use crate::PathError;

/// Parse an attribute path string into segments.
///
/// - `[]` becomes the append marker.
/// - Tokens are the maximal runs of characters other than `.`, `[` and `]`.
/// - An all-digit token becomes an [`Seg::Index`], anything else a [`Seg::Key`].
///
/// # Errors
///
/// [`PathError::InvalidPath`] when the string holds no tokens.
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;

    // Delimiters are ASCII, so byte offsets are always char boundaries.
    while i < bytes.len() {
        match bytes[i] {
            b'.' | b'[' | b']' => {
                if let Some(s) = start.take() {
                    segments.push(token_to_seg(&input[s..i]));
                }
                if bytes[i] == b'[' && bytes.get(i + 1) == Some(&b']') {
                    segments.push(Seg::append());
                    i += 2;
                    continue;
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
        i += 1;
    }
    if let Some(s) = start {
        segments.push(token_to_seg(&input[s..]));
    }

    if segments.is_empty() {
        return Err(PathError::InvalidPath(input.to_string()));
    }
    Ok(Path::from_segments(segments))
}

fn token_to_seg(token: &str) -> Seg {
    if is_integer(token) {
        // Digit runs too large for an index stay keys.
        if let Ok(i) = token.parse::<usize>() {
            if i != APPEND {
                return Seg::Index(i);
            }
        }
    }
    Seg::Key(token.to_string())
}

/// Format segments back into path syntax.
///
/// The first key is bare, later keys are prefixed with `.`, indices render
/// as `[n]` and the append marker as `[]`.
pub fn format_path(path: &[Seg]) -> String {
    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        if i > 0 && seg.is_key() {
            out.push('.');
        }
        out.push_str(&seg.to_string());
    }
    out
}

/// Anything that names a path: strings are parsed, segment lists pass through.
pub trait IntoPath {
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(self)
    }
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for Vec<Seg> {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_segments(self))
    }
}

impl IntoPath for &[Seg] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from(self))
    }
}

impl<const N: usize> IntoPath for [Seg; N] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_segments(self.into()))
    }
}

/// Check if a path points to the root.
pub fn is_root(path: &[Seg]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &[Seg], child: &[Seg]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Get the parent path of a given path.
pub fn parent(path: &[Seg]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, init)) => Ok(Path::from(init)),
        None => Err(PathError::NoParent),
    }
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}
