//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for snarl using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages.
//!
//! # Commands
//!
//! - `analyze`: Build the full dependency graph and run every analysis
//! - `cycles`: Detect circular dependencies with breaking suggestions
//! - `risks`: Cascade risks, project score, and unblock priorities
//! - `chains`: Longest blocking chains
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! snarl analyze --snapshot issues.json --projects PROJ,CORE
//! snarl risks --snapshot issues.json --projects PROJ --top 3
//! snarl cycles --snapshot issues.json --projects PROJ --json
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{AnalyzeArgs, ChainsArgs, CyclesArgs, RisksArgs, SnapshotArgs};

// Re-export types
pub use types::LinkTypeArg;

// Re-export validators for external use
pub use validators::validate_project_key;

use crate::output::OutputMode;

/// Snarl - dependency-graph risk analysis for issue trackers
///
/// Builds a dependency graph from an issue snapshot and reports circular
/// dependencies, cascade risks, and blocking chains.
#[derive(Parser, Debug)]
#[command(name = "snarl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full dependency analysis
    ///
    /// Builds the graph and reports the summary, edges, cycles, cascade
    /// risks, and blocking chains in one pass.
    Analyze(AnalyzeArgs),

    /// Detect circular dependencies
    ///
    /// Enumerates every distinct cycle and suggests how to break each one.
    Cycles(CyclesArgs),

    /// Assess cascade risk
    ///
    /// Shows which issues would stall the most other work if delayed, the
    /// project-level risk score, and a ranked unblock list.
    Risks(RisksArgs),

    /// Find the longest blocking chains
    ///
    /// Walks the blocking subgraph from unblocked roots and reports the
    /// deepest uninterrupted sequences.
    Chains(ChainsArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Commands::Analyze(args) => execute::execute_analyze(args, output_mode).await,
            Commands::Cycles(args) => execute::execute_cycles(args, output_mode).await,
            Commands::Risks(args) => execute::execute_risks(args, output_mode).await,
            Commands::Chains(args) => execute::execute_chains(args, output_mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_projects() {
        let cli = Cli::try_parse_from([
            "snarl",
            "analyze",
            "--snapshot",
            "issues.json",
            "--projects",
            "proj,core",
        ])
        .unwrap();
        assert!(!cli.json);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        // Keys are normalized to uppercase at parse time.
        assert_eq!(args.snapshot.projects, vec!["PROJ", "CORE"]);
    }

    #[test]
    fn rejects_bad_project_key() {
        let result = Cli::try_parse_from([
            "snarl",
            "risks",
            "--snapshot",
            "issues.json",
            "--projects",
            "9bad",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from([
            "snarl",
            "chains",
            "--snapshot",
            "issues.json",
            "--projects",
            "PROJ",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
    }
}
