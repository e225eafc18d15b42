//! Integration tests for arcfs-core.
//!
//! These tests mount real archives written to a temporary directory and
//! query them through the public API only.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Read;
use std::io::Write;
use std::path::PathBuf;

use arcfs_core::ArchiveType;
use arcfs_core::ContentSource;
use arcfs_core::EntryKind;
use arcfs_core::FsConfig;
use arcfs_core::FsError;
use arcfs_core::TraversalPolicy;
use arcfs_core::open_archive;
use arcfs_core::open_archive_as;
use arcfs_core::test_utils::TarTestBuilder;
use arcfs_core::test_utils::ZipTestBuilder;
use tempfile::TempDir;

/// The tree used by most tests:
///
/// ```text
/// /root/            directory
/// /root/a.txt       "alpha"
/// /root/sub/        directory
/// /root/sub/b.txt   "bravo"
/// ```
fn sample_tar() -> Vec<u8> {
    TarTestBuilder::new()
        .add_raw("/root/", tar::EntryType::Directory, b"")
        .add_raw("/root/a.txt", tar::EntryType::Regular, b"alpha")
        .add_raw("/root/sub/", tar::EntryType::Directory, b"")
        .add_raw("/root/sub/b.txt", tar::EntryType::Regular, b"bravo")
        .build()
}

fn sample_zip() -> Vec<u8> {
    ZipTestBuilder::new()
        .add_directory("root/")
        .add_file("root/a.txt", b"alpha")
        .add_directory("root/sub/")
        .add_file("root/sub/b.txt", b"bravo")
        .build()
}

fn compress(format: ArchiveType, data: &[u8]) -> Vec<u8> {
    match format {
        ArchiveType::Tar | ArchiveType::Zip => data.to_vec(),
        ArchiveType::TarGz => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        ArchiveType::TarBz2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        ArchiveType::TarXz => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        ArchiveType::TarZst => zstd::encode_all(data, 3).unwrap(),
    }
}

fn write_archive(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn read_string(fs: &arcfs_core::ArchiveFs<arcfs_core::ArchiveSource>, path: &str) -> String {
    String::from_utf8(fs.read(path).unwrap()).unwrap()
}

fn names(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn test_every_tar_format_mounts() {
    let temp = TempDir::new().unwrap();
    for (name, format) in [
        ("a.tar", ArchiveType::Tar),
        ("a.tar.gz", ArchiveType::TarGz),
        ("a.tar.bz2", ArchiveType::TarBz2),
        ("a.tar.xz", ArchiveType::TarXz),
        ("a.tar.zst", ArchiveType::TarZst),
    ] {
        let path = write_archive(&temp, name, &compress(format, &sample_tar()));
        let fs = open_archive(&path, &FsConfig::default())
            .unwrap_or_else(|e| panic!("{name}: {e}"));

        assert_eq!(fs.source().format_name(), format.name());
        assert_eq!(fs.root(), "/root/", "{name}");
        assert_eq!(read_string(&fs, "/root/a.txt"), "alpha", "{name}");
        assert_eq!(read_string(&fs, "root/sub/b.txt"), "bravo", "{name}");
        // Read out of archive order to force a fresh stream per member.
        assert_eq!(read_string(&fs, "/root/a.txt"), "alpha", "{name}");
    }
}

#[test]
fn test_zip_mounts() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.zip", &sample_zip());
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), "root/");
    assert_eq!(read_string(&fs, "/root/sub/b.txt"), "bravo");
    assert_eq!(names(&fs.list_directory("/root").unwrap()), vec!["a.txt", "sub"]);
}

#[test]
fn test_listing_immediate_children() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar", &sample_tar());
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    let children = fs.list_directory("/root").unwrap();
    assert_eq!(names(&children), vec!["a.txt", "sub"]);
    assert!(!children.contains("b.txt"));

    assert_eq!(names(&fs.list_directory("/root/sub/").unwrap()), vec!["b.txt"]);
}

#[test]
fn test_wrong_kind_errors() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar.gz", &compress(ArchiveType::TarGz, &sample_tar()));
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert!(!fs.is_file("/root/sub").unwrap());
    assert!(fs.is_directory("/root/sub").unwrap());
    assert!(matches!(
        fs.open("/root/sub"),
        Err(FsError::NotAFile { path }) if path == "/root/sub"
    ));
    assert!(matches!(
        fs.list_directory("/root/a.txt"),
        Err(FsError::NotADirectory { .. })
    ));
}

#[test]
fn test_missing_path() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.zip", &sample_zip());
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert!(!fs.exists("/nope"));
    assert!(matches!(
        fs.open("/nope"),
        Err(FsError::NotFound { path }) if path == "/nope"
    ));
    assert!(matches!(fs.is_file("/nope"), Err(FsError::NotFound { .. })));
    assert!(matches!(
        fs.list_directory("/nope"),
        Err(FsError::NotFound { .. })
    ));
}

#[test]
fn test_path_equivalence() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar", &sample_tar());
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    for spelling in ["root/sub", "/root/sub", "/root/sub/", "root/sub/", "//root//sub//"] {
        assert!(fs.exists(spelling), "{spelling}");
        assert!(fs.is_directory(spelling).unwrap(), "{spelling}");
    }
}

#[test]
fn test_root_listing_contains_member() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_raw("/pkg/", tar::EntryType::Directory, b"")
        .add_raw("/pkg/main.go", tar::EntryType::Regular, b"package main")
        .build();
    let path = write_archive(&temp, "pkg.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), "/pkg/");
    assert!(fs.list_directory(fs.root()).unwrap().contains("main.go"));
}

#[test]
fn test_root_after_pax_global_header() {
    // Layout written by `git archive`: archive-wide metadata comes first.
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_raw(
            "pax_global_header",
            tar::EntryType::XGlobalHeader,
            b"52 comment=0123456789abcdef0123456789abcdef01234567\n",
        )
        .add_directory("pkg/")
        .add_file("pkg/main.go", b"package main")
        .build();
    let path = write_archive(&temp, "git.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), "pkg/");
    assert!(fs.list_directory(fs.root()).unwrap().contains("main.go"));
    assert!(!fs.exists("/pax_global_header"));
    assert_eq!(fs.len(), 2);
}

#[test]
fn test_root_with_long_name() {
    let temp = TempDir::new().unwrap();
    let long_dir = format!("{}/", "component".repeat(15));
    let data = TarTestBuilder::new()
        .add_directory(&long_dir)
        .add_file(&format!("{long_dir}readme.md"), b"# readme")
        .build();
    let path = write_archive(&temp, "long.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), long_dir);
    assert!(fs.is_directory(fs.root()).unwrap());
    assert!(fs.list_directory(fs.root()).unwrap().contains("readme.md"));
    assert_eq!(read_string(&fs, &format!("/{long_dir}readme.md")), "# readme");
}

#[test]
fn test_root_with_long_link_target() {
    let temp = TempDir::new().unwrap();
    let long_target = format!("{}/target.txt", "nested".repeat(20));
    let data = TarTestBuilder::new()
        .add_symlink("current", &long_target)
        .add_file("other.txt", b"other")
        .build();
    let path = write_archive(&temp, "link.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), "current");
    let link = fs.metadata("/current").unwrap();
    assert_eq!(link.kind.link_target(), Some(long_target.as_str()));
    assert_eq!(fs.len(), 2);
}

#[test]
fn test_apple_double_members_hidden() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_file("._project", b"resource fork")
        .add_directory("project/")
        .add_file("project/notes.txt", b"notes")
        .add_raw("._notes.txt", tar::EntryType::Regular, b"resource fork")
        .build();
    let path = write_archive(&temp, "mac.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.root(), "project/");
    assert!(!fs.exists("/._project"));
    assert!(!fs.exists("/._notes.txt"));
    assert_eq!(fs.len(), 2);

    let shown = open_archive(&path, &FsConfig::default().with_hidden_prefix("")).unwrap();
    assert_eq!(shown.root(), "._project");
    assert!(shown.is_file("/._project").unwrap());
}

#[test]
fn test_only_hidden_members_is_empty() {
    let temp = TempDir::new().unwrap();
    let data = ZipTestBuilder::new().add_file("._x", b"x").build();
    let path = write_archive(&temp, "meta.zip", &data);

    assert!(matches!(
        open_archive(&path, &FsConfig::default()),
        Err(FsError::EmptyArchive)
    ));
}

#[test]
fn test_synthetic_root_lists_top_level() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.zip", &sample_zip());

    let plain = open_archive(&path, &FsConfig::default()).unwrap();
    assert!(!plain.exists("/"));

    let fs = open_archive(&path, &FsConfig::default().with_synthetic_root(true)).unwrap();
    assert!(fs.is_directory("/").unwrap());
    assert_eq!(names(&fs.list_directory("/").unwrap()), vec!["root"]);
}

#[test]
fn test_duplicate_member_last_wins() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_file("config.toml", b"first")
        .add_file("config.toml", b"second")
        .build();
    let path = write_archive(&temp, "dup.tar.zst", &compress(ArchiveType::TarZst, &data));
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    assert_eq!(fs.len(), 1);
    assert_eq!(read_string(&fs, "config.toml"), "second");
}

#[test]
fn test_links_are_neither_file_nor_directory() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_directory("bin/")
        .add_file("bin/tool", b"#!/bin/sh")
        .add_symlink("bin/alias", "tool")
        .add_hardlink("bin/copy", "bin/tool")
        .build();
    let path = write_archive(&temp, "links.tar", &data);
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    for link in ["bin/alias", "bin/copy"] {
        assert!(fs.exists(link));
        assert!(!fs.is_file(link).unwrap());
        assert!(!fs.is_directory(link).unwrap());
        assert!(matches!(fs.open(link), Err(FsError::NotAFile { .. })));
    }
    assert_eq!(
        fs.metadata("bin/alias").unwrap().kind.link_target(),
        Some("tool")
    );
    assert_eq!(
        names(&fs.list_directory("bin").unwrap()),
        vec!["alias", "copy", "tool"]
    );
}

#[test]
fn test_traversal_policies() {
    let temp = TempDir::new().unwrap();
    let data = TarTestBuilder::new()
        .add_directory("app/")
        .add_raw("app/../escape.txt", tar::EntryType::Regular, b"out")
        .build();
    let path = write_archive(&temp, "evil.tar", &data);

    let kept = open_archive(&path, &FsConfig::default()).unwrap();
    assert!(kept.exists("/app/../escape.txt"));
    assert!(!kept.exists("/escape.txt"));

    let skipped = open_archive(
        &path,
        &FsConfig::default().with_traversal(TraversalPolicy::Skip),
    )
    .unwrap();
    assert_eq!(skipped.len(), 1);

    assert!(matches!(
        open_archive(
            &path,
            &FsConfig::default().with_traversal(TraversalPolicy::Reject)
        ),
        Err(FsError::PathTraversal { .. })
    ));
}

#[test]
fn test_open_streams_large_member() {
    let temp = TempDir::new().unwrap();
    let payload: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let data = TarTestBuilder::new()
        .add_file("small.txt", b"tiny")
        .add_file("big.bin", &payload)
        .add_file("after.txt", b"tail")
        .build();

    for (name, format) in [("big.tar", ArchiveType::Tar), ("big.tar.xz", ArchiveType::TarXz)] {
        let path = write_archive(&temp, name, &compress(format, &data));
        let fs = open_archive(&path, &FsConfig::default()).unwrap();

        let mut reader = fs.open("big.bin").unwrap();
        let mut first = [0u8; 4];
        reader.read_exact(&mut first).unwrap();
        assert_eq!(first, [0, 1, 2, 3]);
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest.len() + 4, payload.len());

        assert_eq!(fs.metadata("big.bin").unwrap().size, payload.len() as u64);
        assert_eq!(read_string(&fs, "after.txt"), "tail");
    }
}

#[test]
fn test_concurrent_opens_are_independent() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar.bz2", &compress(ArchiveType::TarBz2, &sample_tar()));
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    let mut first = fs.open("/root/a.txt").unwrap();
    let mut second = fs.open("/root/sub/b.txt").unwrap();
    let mut a = String::new();
    let mut b = String::new();
    second.read_to_string(&mut b).unwrap();
    first.read_to_string(&mut a).unwrap();
    assert_eq!((a.as_str(), b.as_str()), ("alpha", "bravo"));
}

#[test]
fn test_explicit_format() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "download", &sample_zip());

    assert!(matches!(
        open_archive(&path, &FsConfig::default()),
        Err(FsError::UnsupportedFormat)
    ));
    let fs = open_archive_as(&path, ArchiveType::Zip, &FsConfig::default()).unwrap();
    assert!(fs.is_file("root/a.txt").unwrap());
}

#[test]
fn test_entry_limit() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar", &sample_tar());
    let result = open_archive(&path, &FsConfig::default().with_max_entries(2));
    assert!(matches!(result, Err(FsError::TooManyEntries { max: 2, .. })));
}

#[test]
fn test_corrupt_archive() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "broken.zip", b"PK\x03\x04 not really");
    assert!(matches!(
        open_archive(&path, &FsConfig::default()),
        Err(FsError::InvalidArchive(_))
    ));
}

#[test]
fn test_entries_iteration() {
    let temp = TempDir::new().unwrap();
    let path = write_archive(&temp, "a.tar", &sample_tar());
    let fs = open_archive(&path, &FsConfig::default()).unwrap();

    let mut files: Vec<_> = fs
        .entries()
        .filter(|(_, member)| member.kind == EntryKind::File)
        .map(|(path, _)| path.as_str())
        .collect();
    files.sort_unstable();
    assert_eq!(files, vec!["/root/a.txt", "/root/sub/b.txt"]);
    assert!(fs.source().path().ends_with("a.tar"));
}
