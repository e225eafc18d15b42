//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of `root`
    fn format_root(&self, info: &RootInfo) -> Result<()>;

    /// Format a directory listing
    fn format_listing(
        &self,
        dir: &str,
        entries: &[ListingEntry],
        long: bool,
        human_readable: bool,
    ) -> Result<()>;

    /// Format the result of `stat`
    fn format_stat(&self, stat: &EntryStat) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Archive summary printed by `root`.
#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub archive: String,
    pub format: String,
    pub root: String,
    pub kind: &'static str,
    pub entries: usize,
}

/// One child in a directory listing.
#[derive(Debug, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: &'static str,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
}

/// Entry details printed by `stat`.
#[derive(Debug, Serialize)]
pub struct EntryStat {
    /// Canonical lookup key.
    pub path: String,
    /// Path as stored in the archive.
    pub member_path: String,
    pub kind: &'static str,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
