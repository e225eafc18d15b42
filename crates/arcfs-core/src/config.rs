//! Configuration for building an archive filesystem.

/// What to do with members whose path contains a `..` segment.
///
/// Canonicalization never resolves `..`, so such members are reachable
/// under their literal path when kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalPolicy {
    /// Keep the member under its literal canonical path.
    #[default]
    Keep,
    /// Drop the member from the table.
    Skip,
    /// Fail construction with [`FsError::PathTraversal`](crate::FsError::PathTraversal).
    Reject,
}

/// Configuration for [`ArchiveFs`](crate::ArchiveFs) construction and
/// archive scanning.
///
/// # Examples
///
/// ```
/// use arcfs_core::FsConfig;
/// use arcfs_core::TraversalPolicy;
///
/// // Defaults match plain archive semantics
/// let config = FsConfig::default();
/// assert_eq!(config.hidden_prefix, "._");
///
/// let custom = FsConfig::default()
///     .with_synthetic_root(true)
///     .with_traversal(TraversalPolicy::Skip);
/// ```
#[derive(Debug, Clone)]
pub struct FsConfig {
    /// Raw path prefix marking resource-fork metadata members.
    ///
    /// Members whose raw path starts with this prefix are invisible to every
    /// query. An empty prefix disables the filter.
    ///
    /// Default: `"._"`.
    pub hidden_prefix: String,

    /// Insert a directory entry for `/` when no member maps to it.
    ///
    /// Default: `false` (`/` only exists if the archive stores it).
    pub synthetic_root: bool,

    /// Handling of members with `..` segments.
    ///
    /// Default: [`TraversalPolicy::Keep`].
    pub traversal: TraversalPolicy,

    /// Maximum number of members a format reader will scan.
    ///
    /// Default: `1_000_000`.
    pub max_entries: usize,
}

impl Default for FsConfig {
    /// Creates an `FsConfig` with default settings.
    ///
    /// Default values:
    /// - `hidden_prefix`: `"._"`
    /// - `synthetic_root`: `false`
    /// - `traversal`: `Keep`
    /// - `max_entries`: `1_000_000`
    fn default() -> Self {
        Self {
            hidden_prefix: "._".to_string(),
            synthetic_root: false,
            traversal: TraversalPolicy::Keep,
            max_entries: 1_000_000,
        }
    }
}

impl FsConfig {
    /// Creates a new `FsConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hidden-metadata prefix.
    #[must_use]
    pub fn with_hidden_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hidden_prefix = prefix.into();
        self
    }

    /// Sets whether `/` is synthesized as a directory.
    #[must_use]
    pub fn with_synthetic_root(mut self, enabled: bool) -> Self {
        self.synthetic_root = enabled;
        self
    }

    /// Sets the traversal policy.
    #[must_use]
    pub fn with_traversal(mut self, policy: TraversalPolicy) -> Self {
        self.traversal = policy;
        self
    }

    /// Sets the member limit for format readers.
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Returns `true` if a raw member path is hidden metadata.
    #[must_use]
    pub fn is_hidden(&self, raw_path: &str) -> bool {
        !self.hidden_prefix.is_empty() && raw_path.starts_with(&self.hidden_prefix)
    }
}
