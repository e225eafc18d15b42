//! Error types for archive filesystem operations.

use thiserror::Error;

/// Result type alias using `FsError`.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur while building or querying an archive filesystem.
///
/// Lookup errors carry the path exactly as the caller supplied it, not its
/// canonical form.
#[derive(Error, Debug)]
pub enum FsError {
    /// No entry exists at the requested path.
    #[error("no such file or directory: {path}")]
    NotFound {
        /// The requested path.
        path: String,
    },

    /// The entry exists but is not a regular file.
    #[error("not a file: {path}")]
    NotAFile {
        /// The requested path.
        path: String,
    },

    /// The entry exists but is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The requested path.
        path: String,
    },

    /// The archive has no visible member to use as the root.
    #[error("archive contains no visible entries")]
    EmptyArchive,

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive format is unsupported or unrecognized.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// A member path contains a `..` segment and the traversal policy rejects it.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The raw member path.
        path: String,
    },

    /// The archive holds more members than the configured limit.
    #[error("too many archive entries ({count} > {max})")]
    TooManyEntries {
        /// Number of entries seen so far.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl FsError {
    /// Returns `true` if this error came from a path query against the table.
    ///
    /// Lookup errors are terminal for a single call only; the filesystem
    /// remains usable for further queries.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcfs_core::FsError;
    ///
    /// let err = FsError::NotFound {
    ///     path: "/nope".into(),
    /// };
    /// assert!(err.is_lookup_error());
    ///
    /// assert!(!FsError::EmptyArchive.is_lookup_error());
    /// ```
    #[must_use]
    pub const fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::NotADirectory { .. }
        )
    }

    /// Returns the path associated with this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcfs_core::FsError;
    ///
    /// let err = FsError::NotADirectory {
    ///     path: "/root/a.txt".into(),
    /// };
    /// assert_eq!(err.path(), Some("/root/a.txt"));
    ///
    /// assert_eq!(FsError::UnsupportedFormat.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::NotADirectory { path }
            | Self::PathTraversal { path } => Some(path),
            _ => None,
        }
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            _ => None,
        }
    }
}
