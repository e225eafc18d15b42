//! Value types shared by the filesystem and the format readers.
//!
//! - [`CanonicalPath`]: normalized lookup key, only built by canonicalization
//! - [`EntryKind`]: member type tag
//! - [`MemberRecord`]: decoded member handed over by a format reader

pub mod canonical_path;
pub mod entry_kind;
pub mod member;

pub use canonical_path::CanonicalPath;
pub use canonical_path::canonicalize;
pub use entry_kind::EntryKind;
pub use member::MemberRecord;
