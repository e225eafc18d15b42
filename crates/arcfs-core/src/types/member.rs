//! Decoded archive member records.

use super::EntryKind;

/// One member of an archive as decoded by a format reader.
///
/// `H` is an opaque handle understood by the matching
/// [`ContentSource`](crate::ContentSource). Only file members carry one.
///
/// # Examples
///
/// ```
/// use arcfs_core::MemberRecord;
///
/// let dir: MemberRecord<usize> = MemberRecord::directory("pkg/");
/// let file = MemberRecord::file("pkg/main.go", 12, 0_usize);
/// assert!(dir.kind.is_directory());
/// assert_eq!(file.content, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord<H> {
    /// Raw member path as stored in the archive.
    pub path: String,
    /// Member kind.
    pub kind: EntryKind,
    /// Uncompressed size in bytes (0 for non-files).
    pub size: u64,
    /// Content handle, present only for regular files.
    pub content: Option<H>,
}

impl<H> MemberRecord<H> {
    /// Creates a regular file record.
    pub fn file(path: impl Into<String>, size: u64, content: H) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size,
            content: Some(content),
        }
    }

    /// Creates a directory record.
    pub fn directory(path: impl Into<String>) -> Self {
        Self::without_content(path, EntryKind::Directory)
    }

    /// Creates a record of a kind that has no readable content.
    pub fn without_content(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            size: 0,
            content: None,
        }
    }
}
