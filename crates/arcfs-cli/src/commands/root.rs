//! Root command implementation

use super::mount;
use crate::cli::RootArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::output::RootInfo;
use anyhow::Result;
use arcfs_core::ContentSource;

pub fn execute(args: &RootArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let fs = mount(&args.mount)?;
    let root = fs.root();
    let member = add_archive_context(fs.metadata(root), &args.mount.archive)?;

    if !member.kind.is_directory() {
        formatter.format_warning(&format!(
            "archive root '{root}' is a {}, not a directory",
            member.kind
        ));
    }

    formatter.format_root(&RootInfo {
        archive: args.mount.archive.display().to_string(),
        format: fs.source().format_name().to_string(),
        root: root.to_string(),
        kind: member.kind.as_str(),
        entries: fs.len(),
    })
}
