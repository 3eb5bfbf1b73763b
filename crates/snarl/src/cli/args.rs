//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::types::LinkTypeArg;
use super::validators::validate_project_key;

/// Arguments shared by every analysis command.
#[derive(Parser, Debug, Clone)]
pub struct SnapshotArgs {
    /// Path to the issue snapshot JSON file
    ///
    /// Falls back to the `snapshot` entry in snarl.yaml when omitted.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Project keys to analyze (comma-separated)
    ///
    /// Falls back to the `projects` entry in snarl.yaml when omitted.
    #[arg(short, long, value_delimiter = ',', value_parser = validate_project_key)]
    pub projects: Vec<String>,

    /// Path to the configuration file (default: ./snarl.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Snapshot, projects, and config selection
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Relationship kinds admitted as edges (comma-separated)
    ///
    /// Defaults to the four blocking-family kinds.
    #[arg(short, long, value_delimiter = ',', value_enum)]
    pub link_types: Vec<LinkTypeArg>,

    /// Skip cycle detection
    #[arg(long)]
    pub no_cycles: bool,

    /// Skip cascade-risk calculation
    #[arg(long)]
    pub no_cascade: bool,
}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone)]
pub struct CyclesArgs {
    /// Snapshot, projects, and config selection
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

/// Arguments for the `risks` command
#[derive(Parser, Debug, Clone)]
pub struct RisksArgs {
    /// Snapshot, projects, and config selection
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Number of unblock priorities to show
    #[arg(short, long, default_value = "5")]
    pub top: usize,
}

/// Arguments for the `chains` command
#[derive(Parser, Debug, Clone)]
pub struct ChainsArgs {
    /// Snapshot, projects, and config selection
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}
