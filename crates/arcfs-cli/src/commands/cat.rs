//! Cat command implementation
//!
//! Streams the member straight to stdout without buffering it in memory.

use super::mount;
use crate::cli::CatArgs;
use crate::error::add_archive_context;
use anyhow::Context;
use anyhow::Result;
use std::io;
use std::io::Write;

pub fn execute(args: &CatArgs) -> Result<()> {
    let fs = mount(&args.mount)?;
    let mut reader = add_archive_context(fs.open(&args.path), &args.mount.archive)?;

    let mut stdout = io::stdout().lock();
    io::copy(&mut reader, &mut stdout)
        .with_context(|| format!("failed to read '{}'", args.path))?;
    stdout.flush()?;
    Ok(())
}
