//! Subcommand implementations.

pub mod cat;
pub mod completion;
pub mod ls;
pub mod root;
pub mod stat;

use crate::cli::MountArgs;
use crate::error::add_archive_context;
use anyhow::Result;
use arcfs_core::ArchiveFs;
use arcfs_core::ArchiveSource;
use arcfs_core::open_archive;
use arcfs_core::open_archive_as;
use tracing::debug;

/// Opens the archive named by `args` with the configuration its flags build.
pub fn mount(args: &MountArgs) -> Result<ArchiveFs<ArchiveSource>> {
    let config = args.config();
    debug!(archive = %args.archive.display(), ?config, "opening archive");

    let result = match args.format {
        Some(format) => open_archive_as(&args.archive, format.into(), &config),
        None => open_archive(&args.archive, &config),
    };
    add_archive_context(result, &args.archive)
}
