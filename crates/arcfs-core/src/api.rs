//! High-level entry points for mounting archive files.

use std::path::Path;

use tracing::info;

use crate::ArchiveFs;
use crate::FsConfig;
use crate::Result;
use crate::formats::ArchiveSource;
use crate::formats::detect::ArchiveType;
use crate::formats::detect::detect_format;

/// Opens an archive file as a read-only filesystem.
///
/// The format is detected from the file extension. Member headers are read
/// once here; member contents are only read when opened.
///
/// # Errors
///
/// Returns an error if:
/// - The format cannot be determined from the extension
/// - The archive file cannot be opened or its headers are corrupt
/// - The archive has no visible members
///
/// # Examples
///
/// ```no_run
/// use arcfs_core::FsConfig;
/// use arcfs_core::open_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = open_archive("release.tar.gz", &FsConfig::default())?;
/// for name in fs.list_directory(fs.root())? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn open_archive<P: AsRef<Path>>(
    archive_path: P,
    config: &FsConfig,
) -> Result<ArchiveFs<ArchiveSource>> {
    let path = archive_path.as_ref();
    let format = detect_format(path)?;
    open_archive_as(path, format, config)
}

/// Opens an archive file as a read-only filesystem using an explicit format.
///
/// # Errors
///
/// Same as [`open_archive`], minus format detection.
pub fn open_archive_as<P: AsRef<Path>>(
    archive_path: P,
    format: ArchiveType,
    config: &FsConfig,
) -> Result<ArchiveFs<ArchiveSource>> {
    let path = archive_path.as_ref();
    let (source, members) = ArchiveSource::scan(path, format, config)?;
    let fs = ArchiveFs::with_config(members, source, config)?;

    info!(
        archive = %path.display(),
        format = format.name(),
        entries = fs.len(),
        "archive mounted"
    );

    Ok(fs)
}
