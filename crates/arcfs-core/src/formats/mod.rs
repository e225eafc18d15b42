//! Archive format collaborators.
//!
//! Each reader scans an archive into ordered [`MemberRecord`]s and provides
//! the [`ContentSource`] that opens file members later on. [`ArchiveSource`]
//! dispatches over all supported formats.

pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

use std::io::Read;
use std::path::Path;

pub use detect::ArchiveType;
pub use tar::TarHandle;
pub use tar::TarSource;
pub use traits::ContentSource;
pub use zip::ZipHandle;
pub use zip::ZipSource;

use crate::FsConfig;
use crate::Result;
use crate::types::MemberRecord;

/// Content handle of an [`ArchiveSource`] member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveHandle {
    /// Member of a tar-family archive.
    Tar(TarHandle),
    /// Member of a zip archive.
    Zip(ZipHandle),
}

/// Content source for any supported archive format.
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// Tar-family archive.
    Tar(TarSource),
    /// Zip archive.
    Zip(ZipSource),
}

impl ArchiveSource {
    /// Scans the archive at `path` as `format`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the format reader.
    pub fn scan(
        path: &Path,
        format: ArchiveType,
        config: &FsConfig,
    ) -> Result<(Self, Vec<MemberRecord<ArchiveHandle>>)> {
        if format == ArchiveType::Zip {
            let (source, members) = ZipSource::scan(path, config)?;
            Ok((Self::Zip(source), rewrap(members, ArchiveHandle::Zip)))
        } else {
            let (source, members) = TarSource::scan(path, format, config)?;
            Ok((Self::Tar(source), rewrap(members, ArchiveHandle::Tar)))
        }
    }

    /// Returns the archive file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Tar(source) => source.path(),
            Self::Zip(source) => source.path(),
        }
    }
}

impl ContentSource for ArchiveSource {
    type Handle = ArchiveHandle;
    type Reader<'a> = Box<dyn Read + Send>;

    fn extract(&self, handle: &ArchiveHandle) -> Result<Self::Reader<'_>> {
        match (self, handle) {
            (Self::Tar(source), ArchiveHandle::Tar(handle)) => Ok(Box::new(source.extract(handle)?)),
            (Self::Zip(source), ArchiveHandle::Zip(handle)) => source.extract(handle),
            _ => Err(crate::FsError::InvalidArchive(
                "content handle does not belong to this archive format".to_string(),
            )),
        }
    }

    fn format_name(&self) -> &str {
        match self {
            Self::Tar(source) => source.format_name(),
            Self::Zip(source) => source.format_name(),
        }
    }
}

fn rewrap<H>(
    members: Vec<MemberRecord<H>>,
    wrap: fn(H) -> ArchiveHandle,
) -> Vec<MemberRecord<ArchiveHandle>> {
    members
        .into_iter()
        .map(|member| MemberRecord {
            path: member.path,
            kind: member.kind,
            size: member.size,
            content: member.content.map(wrap),
        })
        .collect()
}
