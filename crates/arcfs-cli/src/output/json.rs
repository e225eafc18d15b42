//! JSON output formatter for machine-readable results.

use super::formatter::EntryStat;
use super::formatter::JsonOutput;
use super::formatter::ListingEntry;
use super::formatter::OutputFormatter;
use super::formatter::RootInfo;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    path: &'a str,
    entries: &'a [ListingEntry],
}

#[derive(Serialize)]
struct WarningData<'a> {
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format_root(&self, info: &RootInfo) -> Result<()> {
        Self::output(&JsonOutput::success("root", info))
    }

    // JSON always carries kind and size, so the display flags are moot.
    fn format_listing(
        &self,
        dir: &str,
        entries: &[ListingEntry],
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        let data = ListingOutput { path: dir, entries };
        Self::output(&JsonOutput::success("ls", data))
    }

    fn format_stat(&self, stat: &EntryStat) -> Result<()> {
        Self::output(&JsonOutput::success("stat", stat))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("arcfs", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        let output = JsonOutput::success("warning", WarningData { message });
        let _ = Self::output(&output);
    }
}
