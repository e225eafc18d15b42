//! CLI argument parsing using clap.

use arcfs_core::ArchiveType;
use arcfs_core::FsConfig;
use arcfs_core::TraversalPolicy;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcfs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the archive's logical root
    Root(RootArgs),
    /// List the entries directly inside a directory
    Ls(LsArgs),
    /// Write a file's contents to stdout
    Cat(CatArgs),
    /// Show details of a single entry
    Stat(StatArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

/// Archive location and mount options shared by every archive command.
#[derive(clap::Args)]
pub struct MountArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Archive format (default: detect from extension)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Expose "/" as a directory holding the top-level entries
    #[arg(long)]
    pub synthetic_root: bool,

    /// Drop entries whose path contains a ".." segment
    #[arg(long, conflicts_with = "reject_traversal")]
    pub skip_traversal: bool,

    /// Refuse archives with entries whose path contains a ".." segment
    #[arg(long)]
    pub reject_traversal: bool,

    /// Hide entries whose path starts with this prefix ("" hides nothing)
    #[arg(long, value_name = "PREFIX", default_value = "._")]
    pub hidden_prefix: String,

    /// Maximum number of archive entries to read
    #[arg(long, default_value = "1000000")]
    pub max_entries: usize,
}

impl MountArgs {
    /// Builds the filesystem configuration from the flags.
    pub fn config(&self) -> FsConfig {
        let traversal = if self.reject_traversal {
            TraversalPolicy::Reject
        } else if self.skip_traversal {
            TraversalPolicy::Skip
        } else {
            TraversalPolicy::Keep
        };

        FsConfig::default()
            .with_hidden_prefix(self.hidden_prefix.clone())
            .with_synthetic_root(self.synthetic_root)
            .with_traversal(traversal)
            .with_max_entries(self.max_entries)
    }
}

#[derive(clap::Args)]
pub struct RootArgs {
    #[command(flatten)]
    pub mount: MountArgs,
}

#[derive(clap::Args)]
pub struct LsArgs {
    #[command(flatten)]
    pub mount: MountArgs,

    /// Directory to list (default: the archive root)
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Show entry type and size
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct CatArgs {
    #[command(flatten)]
    pub mount: MountArgs,

    /// File to print
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(clap::Args)]
pub struct StatArgs {
    #[command(flatten)]
    pub mount: MountArgs,

    /// Entry to describe
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Archive formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Tar,
    TarGz,
    TarBz2,
    TarXz,
    TarZst,
    Zip,
}

impl From<FormatArg> for ArchiveType {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Tar => Self::Tar,
            FormatArg::TarGz => Self::TarGz,
            FormatArg::TarBz2 => Self::TarBz2,
            FormatArg::TarXz => Self::TarXz,
            FormatArg::TarZst => Self::TarZst,
            FormatArg::Zip => Self::Zip,
        }
    }
}
