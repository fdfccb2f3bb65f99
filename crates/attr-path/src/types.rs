//! Type definitions for attribute paths.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Reserved index meaning "one past the end of the target sequence".
///
/// Written as `[]` in path strings.
pub const APPEND: usize = usize::MAX;

/// A step in an attribute path.
///
/// Either an object key or an array index. The index [`APPEND`] is the
/// append marker.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object key: `a` in `a.b`.
    Key(String),
    /// Array index: `2` in `a[2]`.
    Index(usize),
}

impl Seg {
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    /// The append marker segment.
    #[inline]
    pub fn append() -> Self {
        Seg::Index(APPEND)
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Seg::Key(_))
    }

    /// True for every index, including the append marker.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    #[inline]
    pub fn is_append(&self) -> bool {
        matches!(self, Seg::Index(APPEND))
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    /// The concrete index, `None` for keys and the append marker.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Index(APPEND) | Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }

    /// The key this segment addresses inside an object.
    ///
    /// Indices address their decimal key (`obj[2]` is `obj["2"]`). The
    /// append marker has no object key.
    pub fn as_object_key(&self) -> Option<Cow<'_, str>> {
        match self {
            Seg::Key(k) => Some(Cow::Borrowed(k)),
            Seg::Index(APPEND) => None,
            Seg::Index(i) => Some(Cow::Owned(i.to_string())),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => f.write_str(k),
            Seg::Index(APPEND) => f.write_str("[]"),
            Seg::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A parsed attribute path.
///
/// # Example
///
/// ```
/// use nested_attr_path::{Path, Seg};
///
/// let path = Path::root().key("users").index(0).key("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1], Seg::Index(0));
/// assert_eq!(path.to_string(), "users[0].name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Seg>);

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The empty path.
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    pub fn append(mut self) -> Self {
        self.0.push(Seg::append());
        self
    }

    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Seg> {
        self.0.pop()
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    pub fn into_segments(self) -> Vec<Seg> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Seg];

    fn deref(&self) -> &[Seg] {
        &self.0
    }
}

impl From<Vec<Seg>> for Path {
    fn from(segments: Vec<Seg>) -> Self {
        Self(segments)
    }
}

impl From<&[Seg]> for Path {
    fn from(segments: &[Seg]) -> Self {
        Self(segments.to_vec())
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = Seg;
    type IntoIter = std::vec::IntoIter<Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format_path(&self.0))
    }
}
