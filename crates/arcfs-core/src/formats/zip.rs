//! Zip archive reader.
//!
//! The central directory is read once with the `zip` crate. Opening a member
//! reads its local file header to locate the data and wraps the raw bytes in
//! a stored or deflate reader, so nothing is decompressed up front. The
//! CRC-32 from the central directory is checked once the member is read to
//! the end.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::DeflateDecoder;
use tracing::debug;
use tracing::warn;

use super::ContentSource;
use crate::FsConfig;
use crate::FsError;
use crate::Result;
use crate::types::EntryKind;
use crate::types::MemberRecord;

const LOCAL_HEADER_SIZE: usize = 30;
const LOCAL_HEADER_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const METHOD_STORED: u16 = 0;
const METHOD_DEFLATED: u16 = 8;
const FLAG_ENCRYPTED: u16 = 0x0001;

/// Location of a file member inside a zip archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipHandle {
    /// Offset of the member's local file header.
    pub header_offset: u64,
    /// Compressed data length from the central directory.
    pub compressed_size: u64,
    /// Uncompressed length from the central directory.
    pub size: u64,
    /// CRC-32 of the uncompressed data from the central directory.
    pub crc32: u32,
}

/// Content source for zip archives.
#[derive(Debug, Clone)]
pub struct ZipSource {
    path: PathBuf,
}

impl ZipSource {
    /// Reads the central directory of the archive at `path` and returns its
    /// source and members in directory order.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArchive`] if the central directory is unreadable
    /// - [`FsError::TooManyEntries`] past `config.max_entries`
    pub fn scan(path: &Path, config: &FsConfig) -> Result<(Self, Vec<MemberRecord<ZipHandle>>)> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(|e| {
            FsError::InvalidArchive(format!("failed to open ZIP archive: {e}"))
        })?;

        if archive.len() > config.max_entries {
            return Err(FsError::TooManyEntries {
                count: archive.len(),
                max: config.max_entries,
            });
        }

        let source = Self {
            path: path.to_path_buf(),
        };
        let mut members = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let (raw_path, is_dir, is_symlink, handle) = {
                let entry = archive.by_index_raw(i).map_err(|e| {
                    FsError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
                })?;
                let is_symlink = entry.unix_mode().is_some_and(is_symlink_mode);
                let handle = ZipHandle {
                    header_offset: entry.header_start(),
                    compressed_size: entry.compressed_size(),
                    size: entry.size(),
                    crc32: entry.crc32(),
                };
                (entry.name().to_string(), entry.is_dir(), is_symlink, handle)
            };

            let member = if is_dir {
                MemberRecord::directory(raw_path)
            } else if is_symlink {
                let target = source.read_symlink_target(&raw_path, &handle);
                MemberRecord::without_content(raw_path, EntryKind::Symlink { target })
            } else {
                MemberRecord::file(raw_path, handle.size, handle)
            };
            members.push(member);
        }

        debug!(
            archive = %path.display(),
            members = members.len(),
            "read zip central directory"
        );

        Ok((source, members))
    }

    /// Reads a symlink body through the same stored/deflate path as file
    /// contents. An unreadable body yields an empty target.
    fn read_symlink_target(&self, raw_path: &str, handle: &ZipHandle) -> String {
        let mut target = String::new();
        let result = self
            .extract(handle)
            .map_err(|e| e.to_string())
            .and_then(|mut reader| {
                reader
                    .read_to_string(&mut target)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!(path = raw_path, error = %e, "unreadable ZIP symlink target");
            target.clear();
        }
        target
    }

    /// Returns the archive file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for ZipSource {
    type Handle = ZipHandle;
    type Reader<'a> = Box<dyn Read + Send>;

    fn extract(&self, handle: &ZipHandle) -> Result<Self::Reader<'_>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(handle.header_offset))?;

        let mut header = [0u8; LOCAL_HEADER_SIZE];
        file.read_exact(&mut header)?;
        if header[..4] != LOCAL_HEADER_SIGNATURE {
            return Err(FsError::InvalidArchive(format!(
                "invalid local file header signature at offset {}",
                handle.header_offset
            )));
        }

        let flags = u16::from_le_bytes([header[6], header[7]]);
        if flags & FLAG_ENCRYPTED != 0 {
            return Err(FsError::InvalidArchive(
                "encrypted ZIP entries are not supported".to_string(),
            ));
        }

        let method = u16::from_le_bytes([header[8], header[9]]);
        let name_len = u64::from(u16::from_le_bytes([header[26], header[27]]));
        let extra_len = u64::from(u16::from_le_bytes([header[28], header[29]]));
        let data_offset = handle
            .header_offset
            .checked_add(LOCAL_HEADER_SIZE as u64)
            .and_then(|v| v.checked_add(name_len))
            .and_then(|v| v.checked_add(extra_len))
            .ok_or_else(|| FsError::InvalidArchive("data offset overflow".to_string()))?;

        file.seek(SeekFrom::Start(data_offset))?;
        let data = BufReader::new(file).take(handle.compressed_size);

        let reader: Box<dyn Read + Send> = match method {
            METHOD_STORED => Box::new(data),
            METHOD_DEFLATED => Box::new(DeflateDecoder::new(data).take(handle.size)),
            other => {
                return Err(FsError::InvalidArchive(format!(
                    "unsupported ZIP compression method: {other}"
                )));
            }
        };
        Ok(Box::new(CrcReader::new(reader, handle.crc32)))
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}

fn is_symlink_mode(mode: u32) -> bool {
    mode & 0o170_000 == 0o120_000
}

/// Checks the CRC-32 of everything read through it once the inner reader
/// reports EOF.
struct CrcReader<R> {
    inner: R,
    hasher: crc32fast::Hasher,
    expected: u32,
    checked: bool,
}

impl<R: Read> CrcReader<R> {
    fn new(inner: R, expected: u32) -> Self {
        Self {
            inner,
            hasher: crc32fast::Hasher::new(),
            expected,
            checked: false,
        }
    }
}

impl<R: Read> Read for CrcReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        } else if !buf.is_empty() && !self.checked {
            self.checked = true;
            let actual = self.hasher.clone().finalize();
            if actual != self.expected {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "CRC-32 mismatch: expected {:#010x}, got {actual:#010x}",
                        self.expected
                    ),
                ));
            }
        }
        Ok(n)
    }
}
