//! Tar archive reader.
//!
//! Headers are scanned once to produce member records. Each file member keeps
//! the position of its data in the decompressed stream; opening it later
//! reopens the archive and seeks (plain tar) or skips (compressed tar) to
//! that position.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use tracing::debug;
use xz2::read::XzDecoder;
use zstd::stream::read::Decoder as ZstdDecoder;

use super::ContentSource;
use super::detect::ArchiveType;
use crate::FsConfig;
use crate::FsError;
use crate::Result;
use crate::types::EntryKind;
use crate::types::MemberRecord;

/// Location of a file member's data inside the decompressed tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TarHandle {
    /// Byte offset of the member data.
    pub offset: u64,
    /// Member data length.
    pub size: u64,
}

/// Content source for the tar family of formats.
///
/// Every [`extract`](ContentSource::extract) opens its own file handle, so
/// concurrent reads never share state.
#[derive(Debug, Clone)]
pub struct TarSource {
    path: PathBuf,
    format: ArchiveType,
}

impl TarSource {
    /// Scans the archive at `path` and returns its source and members in
    /// archive order.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnsupportedFormat`] if `format` is not a tar format
    /// - [`FsError::InvalidArchive`] for corrupt headers
    /// - [`FsError::TooManyEntries`] past `config.max_entries`
    pub fn scan(
        path: &Path,
        format: ArchiveType,
        config: &FsConfig,
    ) -> Result<(Self, Vec<MemberRecord<TarHandle>>)> {
        let mut archive = tar::Archive::new(open_decoder(path, format)?);
        let entries = archive
            .entries()
            .map_err(|e| FsError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

        let mut members = Vec::new();
        for entry_result in entries {
            let entry = entry_result
                .map_err(|e| FsError::InvalidArchive(format!("failed to read TAR entry: {e}")))?;

            // Archive-wide PAX metadata (e.g. `git archive` commit ids), not a member
            if entry.header().entry_type() == tar::EntryType::XGlobalHeader {
                debug!(
                    path = %String::from_utf8_lossy(&entry.path_bytes()),
                    "skipping PAX global header"
                );
                continue;
            }

            if members.len() >= config.max_entries {
                return Err(FsError::TooManyEntries {
                    count: members.len() + 1,
                    max: config.max_entries,
                });
            }

            let raw_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let kind = convert_tar_entry_type(&entry, &raw_path);
            let size = entry.size();
            let member = if kind.is_file() {
                let handle = TarHandle {
                    offset: entry.raw_file_position(),
                    size,
                };
                MemberRecord::file(raw_path, size, handle)
            } else {
                MemberRecord::without_content(raw_path, kind)
            };
            members.push(member);
        }

        debug!(
            archive = %path.display(),
            format = format.name(),
            members = members.len(),
            "scanned tar headers"
        );

        let source = Self {
            path: path.to_path_buf(),
            format,
        };
        Ok((source, members))
    }

    /// Returns the archive file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for TarSource {
    type Handle = TarHandle;
    type Reader<'a> = io::Take<Box<dyn Read + Send>>;

    fn extract(&self, handle: &TarHandle) -> Result<Self::Reader<'_>> {
        let reader: Box<dyn Read + Send> = if self.format == ArchiveType::Tar {
            let mut file = File::open(&self.path)?;
            file.seek(SeekFrom::Start(handle.offset))?;
            Box::new(BufReader::new(file))
        } else {
            let mut decoder = open_decoder(&self.path, self.format)?;
            let skipped = io::copy(&mut decoder.by_ref().take(handle.offset), &mut io::sink())?;
            if skipped != handle.offset {
                return Err(FsError::InvalidArchive(format!(
                    "archive ended before member data at offset {}",
                    handle.offset
                )));
            }
            decoder
        };
        Ok(reader.take(handle.size))
    }

    fn format_name(&self) -> &str {
        self.format.name()
    }
}

fn open_decoder(path: &Path, format: ArchiveType) -> Result<Box<dyn Read + Send>> {
    let reader = BufReader::new(File::open(path)?);
    let decoder: Box<dyn Read + Send> = match format {
        ArchiveType::Tar => Box::new(reader),
        ArchiveType::TarGz => Box::new(GzDecoder::new(reader)),
        ArchiveType::TarBz2 => Box::new(BzDecoder::new(reader)),
        ArchiveType::TarXz => Box::new(XzDecoder::new(reader)),
        ArchiveType::TarZst => Box::new(ZstdDecoder::new(reader)?),
        ArchiveType::Zip => return Err(FsError::UnsupportedFormat),
    };
    Ok(decoder)
}

fn convert_tar_entry_type<R: Read>(entry: &tar::Entry<'_, R>, raw_path: &str) -> EntryKind {
    let link_target = || {
        entry
            .link_name_bytes()
            .map(|target| String::from_utf8_lossy(&target).into_owned())
            .unwrap_or_default()
    };

    match entry.header().entry_type() {
        tar::EntryType::Directory => EntryKind::Directory,
        // Pre-POSIX archives mark directories only by a trailing slash
        tar::EntryType::Regular if raw_path.ends_with('/') => EntryKind::Directory,
        tar::EntryType::Regular | tar::EntryType::Continuous => EntryKind::File,
        tar::EntryType::Symlink => EntryKind::Symlink {
            target: link_target(),
        },
        tar::EntryType::Link => EntryKind::Hardlink {
            target: link_target(),
        },
        _ => EntryKind::Other,
    }
}
