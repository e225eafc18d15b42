//! Error conversion utilities for CLI.
//!
//! Converts arcfs-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcfs_core::FsError;
use std::path::Path;

/// Converts `FsError` to user-friendly anyhow error with context
pub fn convert_fs_error(err: FsError, archive: &Path) -> anyhow::Error {
    match err {
        FsError::NotFound { path } => {
            anyhow!(
                "No such entry in '{}': {path}\n\
                 HINT: Use 'arcfs ls' to see what a directory contains.",
                archive.display()
            )
        }
        FsError::NotAFile { path } => {
            anyhow!(
                "Not a regular file in '{}': {path}\n\
                 HINT: Directories and links have no contents; use 'arcfs stat' to inspect them.",
                archive.display()
            )
        }
        FsError::NotADirectory { path } => {
            anyhow!(
                "Not a directory in '{}': {path}\n\
                 HINT: Use 'arcfs cat' to print a file.",
                archive.display()
            )
        }
        FsError::EmptyArchive => {
            anyhow!(
                "Archive '{}' has no visible entries\n\
                 HINT: Use --hidden-prefix '' to include metadata entries.",
                archive.display()
            )
        }
        FsError::PathTraversal { path } => {
            anyhow!(
                "Archive '{}' has an entry outside its root: {path}\n\
                 HINT: Use --skip-traversal to ignore such entries.",
                archive.display()
            )
        }
        FsError::TooManyEntries { count, max } => {
            anyhow!(
                "Archive '{}' has more than {max} entries (stopped at {count})\n\
                 HINT: Use --max-entries to raise the limit.",
                archive.display()
            )
        }
        FsError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        FsError::UnsupportedFormat => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported formats: tar, tar.gz, tar.bz2, tar.xz, tar.zst, zip. \
                 Use --format if the extension is missing or wrong.",
                archive.display()
            )
        }
        FsError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(
    result: Result<T, FsError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_fs_error(e, archive))
}
