//! Read-only filesystem view over an archive member table.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::FsError;
use crate::Result;
use crate::config::FsConfig;
use crate::config::TraversalPolicy;
use crate::formats::ContentSource;
use crate::types::CanonicalPath;
use crate::types::EntryKind;
use crate::types::MemberRecord;

/// A read-only filesystem backed by an archive's flat member list.
///
/// The member table is built once in [`ArchiveFs::new`] and never changes
/// afterwards. Every query canonicalizes the caller's path and looks it up in
/// that table; directory listings are derived by scanning it.
///
/// Duplicate member paths resolve last-write-wins: a later member replaces an
/// earlier one with the same canonical path.
///
/// # Examples
///
/// ```
/// use arcfs_core::ArchiveFs;
/// use arcfs_core::MemberRecord;
/// use arcfs_core::test_utils::MemorySource;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut source = MemorySource::new();
/// let readme = source.push(b"hello".to_vec());
///
/// let fs = ArchiveFs::new(
///     vec![
///         MemberRecord::directory("pkg/"),
///         MemberRecord::file("pkg/README", 5, readme),
///     ],
///     source,
/// )?;
///
/// assert_eq!(fs.root(), "pkg/");
/// assert!(fs.is_file("/pkg/README")?);
/// assert!(fs.list_directory("pkg")?.contains("README"));
/// # Ok(())
/// # }
/// ```
pub struct ArchiveFs<S: ContentSource> {
    files: HashMap<CanonicalPath, MemberRecord<S::Handle>>,
    root: String,
    source: S,
}

impl<S: ContentSource> ArchiveFs<S> {
    /// Builds the filesystem with the default [`FsConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`FsError::EmptyArchive`] if no visible member remains.
    pub fn new<I>(members: I, source: S) -> Result<Self>
    where
        I: IntoIterator<Item = MemberRecord<S::Handle>>,
    {
        Self::with_config(members, source, &FsConfig::default())
    }

    /// Builds the filesystem from an ordered member sequence.
    ///
    /// Hidden-metadata members are dropped before anything else. The root is
    /// the raw path of the first member that survives filtering.
    ///
    /// # Errors
    ///
    /// - [`FsError::EmptyArchive`] if no visible member remains
    /// - [`FsError::PathTraversal`] if a member has a `..` segment and the
    ///   policy is [`TraversalPolicy::Reject`]
    pub fn with_config<I>(members: I, source: S, config: &FsConfig) -> Result<Self>
    where
        I: IntoIterator<Item = MemberRecord<S::Handle>>,
    {
        let mut files = HashMap::new();
        let mut root: Option<String> = None;
        let mut hidden = 0_usize;
        let mut skipped = 0_usize;
        let mut duplicates = 0_usize;

        for member in members {
            if config.is_hidden(&member.path) {
                hidden += 1;
                continue;
            }

            let key = CanonicalPath::new(&member.path);
            if key.has_parent_segment() {
                match config.traversal {
                    TraversalPolicy::Keep => {}
                    TraversalPolicy::Skip => {
                        warn!(path = %member.path, "skipping member with parent segment");
                        skipped += 1;
                        continue;
                    }
                    TraversalPolicy::Reject => {
                        return Err(FsError::PathTraversal { path: member.path });
                    }
                }
            }

            if root.is_none() {
                root = Some(member.path.clone());
            }

            if let Some(previous) = files.insert(key, member) {
                debug!(path = %previous.path, "duplicate member replaced");
                duplicates += 1;
            }
        }

        let root = root.ok_or(FsError::EmptyArchive)?;

        if config.synthetic_root && !files.contains_key("/") {
            files.insert(CanonicalPath::root(), MemberRecord::directory("/"));
        }

        debug!(
            format = source.format_name(),
            entries = files.len(),
            hidden,
            skipped,
            duplicates,
            root = %root,
            "archive table built"
        );

        Ok(Self {
            files,
            root,
            source,
        })
    }

    /// Returns the logical mount root: the raw path of the first visible
    /// member.
    ///
    /// The root always has an entry in the table, but it is not required to
    /// be a directory.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns `true` if `path` names an entry.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&CanonicalPath::new(path))
    }

    /// Returns `true` if `path` names a directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if `path` does not exist.
    pub fn is_directory(&self, path: &str) -> Result<bool> {
        Ok(self.metadata(path)?.kind.is_directory())
    }

    /// Returns `true` if `path` names a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if `path` does not exist.
    pub fn is_file(&self, path: &str) -> Result<bool> {
        Ok(self.metadata(path)?.kind.is_file())
    }

    /// Returns the member record stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if `path` does not exist.
    pub fn metadata(&self, path: &str) -> Result<&MemberRecord<S::Handle>> {
        self.lookup(&CanonicalPath::new(path), path)
    }

    /// Opens the content stream of the file at `path`.
    ///
    /// The stream comes straight from the [`ContentSource`]; nothing is
    /// buffered here.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::NotAFile`] if the entry is a directory, link or other
    /// - any error raised by the content source
    pub fn open(&self, path: &str) -> Result<S::Reader<'_>> {
        let member = self.metadata(path)?;
        if member.kind != EntryKind::File {
            return Err(FsError::NotAFile {
                path: path.to_string(),
            });
        }
        let handle = member.content.as_ref().ok_or_else(|| {
            FsError::InvalidArchive(format!("file member has no content handle: {path}"))
        })?;
        self.source.extract(handle)
    }

    /// Reads the whole file at `path` into memory.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveFs::open`], plus I/O errors while reading.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let mut reader = self.open(path)?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Lists the names of the immediate children of the directory at `path`.
    ///
    /// Only entries exactly one segment below `path` are returned, by
    /// basename. Every call scans the whole table.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::NotADirectory`] if the entry is not a directory
    pub fn list_directory(&self, path: &str) -> Result<BTreeSet<String>> {
        let dir = CanonicalPath::new(path);
        if !self.lookup(&dir, path)?.kind.is_directory() {
            return Err(FsError::NotADirectory {
                path: path.to_string(),
            });
        }

        Ok(self
            .files
            .keys()
            .filter(|key| key.is_child_of(&dir))
            .filter_map(CanonicalPath::file_name)
            .map(str::to_string)
            .collect())
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the table has no entries.
    ///
    /// Construction rejects empty archives, so this is only `false` in
    /// practice; it exists for API symmetry with [`ArchiveFs::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over all canonical paths in unspecified order.
    pub fn paths(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.files.keys()
    }

    /// Iterates over all entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&CanonicalPath, &MemberRecord<S::Handle>)> {
        self.files.iter()
    }

    /// Returns the content source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn lookup(&self, key: &CanonicalPath, path: &str) -> Result<&MemberRecord<S::Handle>> {
        trace!(path, key = %key, "lookup");
        self.files.get(key).ok_or_else(|| FsError::NotFound {
            path: path.to_string(),
        })
    }
}

impl<S: ContentSource> fmt::Debug for ArchiveFs<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveFs")
            .field("format", &self.source.format_name())
            .field("root", &self.root)
            .field("entries", &self.files.len())
            .finish_non_exhaustive()
    }
}
