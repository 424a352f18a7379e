//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use hotpush_core::BumpKind;

/// hotpush - over-the-air bundle deployment helper
#[derive(Parser, Debug)]
#[command(name = "hotpush")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to hotpush.yaml config file
    #[arg(short, long, global = true, env = "HOTPUSH_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Emit machine-readable JSON lines instead of styled output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Show deployment regions in replication order
    Regions(RegionsArgs),

    /// Show the replication progress for a freshly uploaded bundle
    Replicate(ReplicateArgs),

    /// Compute the next app version
    Bump(BumpArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {}

// Regions command
#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// IANA time zone to order regions for (default: host time zone)
    #[arg(long)]
    pub timezone: Option<String>,
}

// Replicate command
#[derive(Args, Debug)]
pub struct ReplicateArgs {
    /// Simulated duration in seconds
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Refresh interval in milliseconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// IANA time zone to order regions for (default: host time zone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Title shown above the progress line
    #[arg(long)]
    pub title: Option<String>,

    /// Render even when stdout/stderr are not terminals
    #[arg(long)]
    pub force_interactive: bool,
}

// Bump command
#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Current version (default: appVersion from hotpush.yaml)
    #[arg(id = "current", value_name = "VERSION")]
    pub version: Option<String>,

    /// Bump kind; prompts when omitted on an interactive terminal
    #[arg(short, long, value_enum)]
    pub kind: Option<BumpKindArg>,

    /// Prerelease identifier (default: prereleaseId from hotpush.yaml)
    #[arg(long)]
    pub preid: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpKindArg {
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl From<BumpKindArg> for BumpKind {
    fn from(arg: BumpKindArg) -> Self {
        match arg {
            BumpKindArg::Patch => BumpKind::Patch,
            BumpKindArg::Minor => BumpKind::Minor,
            BumpKindArg::Major => BumpKind::Major,
            BumpKindArg::Prerelease => BumpKind::Prerelease,
        }
    }
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
