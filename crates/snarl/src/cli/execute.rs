//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands: resolve the
//! snapshot and projects (flags win over snarl.yaml), load the snapshot,
//! build the graph, and hand the results to the output layer.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use super::args::{AnalyzeArgs, ChainsArgs, CyclesArgs, RisksArgs, SnapshotArgs};
use crate::config::{SnarlConfig, CONFIG_FILE_NAME};
use crate::domain::RelationshipKind;
use crate::graph::{
    build_dependency_graph, cycle_breaking_suggestions, project_risk_score,
    risk_recommendations, unblock_priorities, DependencyGraph, GraphOptions, RiskThresholds,
};
use crate::output::{self, OutputMode};
use crate::source::{IssueSource, JsonSnapshotSource};

/// Snapshot path, projects, and thresholds after merging flags with config.
struct ResolvedInputs {
    snapshot: PathBuf,
    projects: Vec<String>,
    thresholds: RiskThresholds,
}

async fn resolve(args: &SnapshotArgs) -> Result<ResolvedInputs> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME).to_path_buf());
    let config = SnarlConfig::load_or_default(&config_path).await?;

    let snapshot = match &args.snapshot {
        Some(path) => path.clone(),
        None => match &config.snapshot {
            Some(path) => PathBuf::from(path),
            None => bail!("no snapshot given; pass --snapshot or set `snapshot` in snarl.yaml"),
        },
    };

    let projects = if args.projects.is_empty() {
        config.projects.clone()
    } else {
        args.projects.clone()
    };
    if projects.is_empty() {
        bail!("no projects given; pass --projects or set `projects` in snarl.yaml");
    }

    Ok(ResolvedInputs {
        snapshot,
        projects,
        thresholds: config.thresholds,
    })
}

async fn load_graph(inputs: &ResolvedInputs, options: &GraphOptions) -> Result<DependencyGraph> {
    let source = JsonSnapshotSource::new(&inputs.snapshot);
    let snapshot = source.fetch(&inputs.projects).await?;
    Ok(build_dependency_graph(
        &snapshot.issues,
        options,
        &inputs.thresholds,
    ))
}

/// Execute the analyze command
pub async fn execute_analyze(args: &AnalyzeArgs, mode: OutputMode) -> Result<()> {
    let inputs = resolve(&args.snapshot).await?;

    let mut options = GraphOptions::new(inputs.projects.clone());
    if !args.link_types.is_empty() {
        options.link_types = Some(
            args.link_types
                .iter()
                .map(|&arg| RelationshipKind::from(arg))
                .collect(),
        );
    }
    options.detect_cycles = !args.no_cycles;
    options.calculate_cascade_risks = !args.no_cascade;

    let graph = load_graph(&inputs, &options).await?;
    let score = project_risk_score(&graph.cascade_risks);
    let recommendations = risk_recommendations(&graph.cascade_risks);
    let priorities = unblock_priorities(&graph.cascade_risks, 5);

    output::print_analysis(
        &output::AnalysisReport {
            graph: &graph,
            score: &score,
            recommendations: &recommendations,
            priorities: &priorities,
        },
        mode,
    )?;
    Ok(())
}

/// Execute the cycles command
pub async fn execute_cycles(args: &CyclesArgs, mode: OutputMode) -> Result<()> {
    let inputs = resolve(&args.snapshot).await?;

    let mut options = GraphOptions::new(inputs.projects.clone());
    options.calculate_cascade_risks = false;

    let graph = load_graph(&inputs, &options).await?;
    let suggestions: Vec<Vec<String>> = graph
        .cycles
        .iter()
        .map(|cycle| cycle_breaking_suggestions(cycle, &graph.edges))
        .collect();

    output::print_cycles(&graph.cycles, &suggestions, mode)?;
    Ok(())
}

/// Execute the risks command
pub async fn execute_risks(args: &RisksArgs, mode: OutputMode) -> Result<()> {
    let inputs = resolve(&args.snapshot).await?;

    let mut options = GraphOptions::new(inputs.projects.clone());
    options.detect_cycles = false;

    let graph = load_graph(&inputs, &options).await?;
    let score = project_risk_score(&graph.cascade_risks);
    let recommendations = risk_recommendations(&graph.cascade_risks);
    let priorities = unblock_priorities(&graph.cascade_risks, args.top);

    output::print_risks(
        &graph.cascade_risks,
        &score,
        &recommendations,
        &priorities,
        mode,
    )?;
    Ok(())
}

/// Execute the chains command
pub async fn execute_chains(args: &ChainsArgs, mode: OutputMode) -> Result<()> {
    let inputs = resolve(&args.snapshot).await?;

    let mut options = GraphOptions::new(inputs.projects.clone());
    options.detect_cycles = false;
    options.calculate_cascade_risks = false;

    let graph = load_graph(&inputs, &options).await?;
    output::print_chains(&graph.blocking_chains, mode)?;
    Ok(())
}
