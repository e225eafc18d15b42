//! Common traits for archive format collaborators.

use std::io::Read;

use crate::Result;

/// Produces readable byte streams for archive members.
///
/// A format reader hands out one `Handle` per file member while scanning the
/// archive; [`ArchiveFs::open`](crate::ArchiveFs::open) later passes that
/// handle back here. The returned reader is handed to the caller untouched,
/// so its buffering and read-once semantics are the implementation's own.
pub trait ContentSource {
    /// Opaque per-member handle.
    type Handle;

    /// Reader returned for a member.
    type Reader<'a>: Read
    where
        Self: 'a;

    /// Opens the content stream of the member identified by `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying archive cannot be read.
    fn extract(&self, handle: &Self::Handle) -> Result<Self::Reader<'_>>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FixedSource(&'static [u8]);

    impl ContentSource for FixedSource {
        type Handle = ();
        type Reader<'a> = &'a [u8];

        fn extract(&self, _handle: &()) -> Result<&[u8]> {
            Ok(self.0)
        }

        fn format_name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_trait_implementation() {
        let source = FixedSource(b"hello");
        assert_eq!(source.format_name(), "fixed");

        let mut buf = String::new();
        source
            .extract(&())
            .unwrap()
            .read_to_string(&mut buf)
            .unwrap();
        assert_eq!(buf, "hello");
    }
}
