//! Read-only filesystem view over archive files.
//!
//! `arcfs-core` reads an archive's member headers once and answers
//! filesystem questions from that table: does a path exist, is it a file or
//! a directory, what are a directory's children. File contents are streamed
//! from the archive only when a member is opened.
//!
//! Paths are compared in canonical form: a single leading `/`, no trailing
//! `/`, and no empty segments. `pkg/`, `/pkg` and `pkg` all name the same
//! entry. Directory listings are derived from the flat table, so a directory
//! shows up in a listing only if the archive stores an entry for it.
//!
//! # Examples
//!
//! ```no_run
//! use arcfs_core::FsConfig;
//! use arcfs_core::open_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = open_archive("release.tar.gz", &FsConfig::default())?;
//! println!("root: {}", fs.root());
//! if fs.is_file("/pkg/README.md")? {
//!     let text = String::from_utf8(fs.read("/pkg/README.md")?)?;
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod formats;
pub mod fs;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

pub use api::open_archive;
pub use api::open_archive_as;
pub use config::FsConfig;
pub use config::TraversalPolicy;
pub use error::FsError;
pub use error::Result;
pub use formats::ArchiveHandle;
pub use formats::ArchiveSource;
pub use formats::ArchiveType;
pub use formats::ContentSource;
pub use fs::ArchiveFs;
pub use types::CanonicalPath;
pub use types::EntryKind;
pub use types::MemberRecord;
pub use types::canonicalize;
