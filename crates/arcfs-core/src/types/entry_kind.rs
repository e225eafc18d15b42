//! Archive member kind enumeration.

use std::fmt;

/// Kind of a member in an archive.
///
/// Only [`EntryKind::File`] and [`EntryKind::Directory`] take part in
/// filesystem semantics. Links keep their stated target as metadata but are
/// never resolved, so for every query they behave like [`EntryKind::Other`].
///
/// # Examples
///
/// ```
/// use arcfs_core::EntryKind;
///
/// let link = EntryKind::Symlink {
///     target: "../target".into(),
/// };
/// assert!(!link.is_file());
/// assert!(!link.is_directory());
/// assert_eq!(link.link_target(), Some("../target"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry with its unresolved target.
    Symlink {
        /// The symlink target as stored in the archive.
        target: String,
    },

    /// Hard link entry with its unresolved target.
    Hardlink {
        /// The hardlink target as stored in the archive.
        target: String,
    },

    /// Any other member type (devices, FIFOs, format-specific records).
    Other,
}

impl EntryKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns the stated link target for symlinks and hardlinks.
    #[must_use]
    pub fn link_target(&self) -> Option<&str> {
        match self {
            Self::Symlink { target } | Self::Hardlink { target } => Some(target),
            _ => None,
        }
    }

    /// Short lowercase name used in listings and JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink { .. } => "symlink",
            Self::Hardlink { .. } => "hardlink",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
