//! Stat command implementation

use super::mount;
use crate::cli::StatArgs;
use crate::error::add_archive_context;
use crate::output::EntryStat;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcfs_core::canonicalize;

pub fn execute(args: &StatArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let fs = mount(&args.mount)?;
    let member = add_archive_context(fs.metadata(&args.path), &args.mount.archive)?;

    formatter.format_stat(&EntryStat {
        path: canonicalize(&args.path).to_string(),
        member_path: member.path.clone(),
        kind: member.kind.as_str(),
        size: member.size,
        link_target: member.kind.link_target().map(str::to_string),
    })
}
