//! Canonical `/`-rooted path keys.

use std::borrow::Borrow;
use std::fmt;

/// A normalized path used as the lookup key of an archive filesystem.
///
/// A `CanonicalPath` is either `/` or `/seg1/seg2/.../segN`: it always starts
/// with exactly one slash, never ends with one (except the root) and never
/// contains empty segments.
///
/// Canonicalization is purely textual. `.` and `..` segments are kept as-is
/// and nothing is percent-decoded.
///
/// # Examples
///
/// ```
/// use arcfs_core::CanonicalPath;
///
/// assert_eq!(CanonicalPath::new("a/b/").as_str(), "/a/b");
/// assert_eq!(CanonicalPath::new("//a//b").as_str(), "/a/b");
/// assert!(CanonicalPath::new("").is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Canonicalizes a raw path. Never fails.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut canonical = String::with_capacity(raw.len() + 1);
        for segment in raw.split('/').filter(|s| !s.is_empty()) {
            canonical.push('/');
            canonical.push_str(segment);
        }
        if canonical.is_empty() {
            canonical.push('/');
        }
        Self(canonical)
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Iterates over the path segments. The root has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.bytes().filter(|&b| b == b'/').count()
        }
    }

    /// Returns the parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some("/"),
            Some(idx) => Some(&self.0[..idx]),
            None => None,
        }
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    /// Returns `true` if `self` is exactly one segment below `dir`.
    ///
    /// The comparison is segment-wise: `/abc/x` is not a child of `/ab`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcfs_core::CanonicalPath;
    ///
    /// let dir = CanonicalPath::new("/ab");
    /// assert!(CanonicalPath::new("/ab/x").is_child_of(&dir));
    /// assert!(!CanonicalPath::new("/abc/x").is_child_of(&dir));
    /// assert!(!CanonicalPath::new("/ab/x/y").is_child_of(&dir));
    /// ```
    #[must_use]
    pub fn is_child_of(&self, dir: &Self) -> bool {
        self.parent() == Some(dir.as_str())
    }

    /// Returns `true` if any segment is `..`.
    #[must_use]
    pub fn has_parent_segment(&self) -> bool {
        self.segments().any(|s| s == "..")
    }
}

/// Canonicalizes a raw path string.
///
/// Equivalent to [`CanonicalPath::new`].
#[must_use]
pub fn canonicalize(raw: &str) -> CanonicalPath {
    CanonicalPath::new(raw)
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalPath> for String {
    fn from(path: CanonicalPath) -> Self {
        path.0
    }
}
