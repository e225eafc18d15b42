//! Ls command implementation

use super::mount;
use crate::cli::LsArgs;
use crate::error::add_archive_context;
use crate::output::ListingEntry;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcfs_core::CanonicalPath;

pub fn execute(args: &LsArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let fs = mount(&args.mount)?;
    let archive = &args.mount.archive;
    let path = args.path.as_deref().unwrap_or_else(|| fs.root());

    let names = add_archive_context(fs.list_directory(path), archive)?;
    let dir = CanonicalPath::new(path);

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let child = format!("{dir}/{name}");
        let member = add_archive_context(fs.metadata(&child), archive)?;
        entries.push(ListingEntry {
            name,
            kind: member.kind.as_str(),
            size: member.size,
            link_target: member.kind.link_target().map(str::to_string),
        });
    }

    formatter.format_listing(dir.as_str(), &entries, args.long, args.human_readable)
}
