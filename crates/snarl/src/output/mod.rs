//! Output formatting for CLI commands.
//!
//! Renders analysis results in both human-readable text and JSON for
//! programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use crate::graph::{
    BlockingChain, CascadeRisk, Cycle, DependencyGraph, ProjectRiskScore, UnblockPriority,
};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colorize_key, colorize_risk, dimmed, status_icon};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Edge rows shown in text mode before truncating.
const MAX_EDGE_ROWS: usize = 25;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `SNARL_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `SNARL_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value)
    /// - `SNARL_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        let max_width = match env::var("SNARL_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "SNARL_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = env::var("SNARL_ASCII")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        // Respect the NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("SNARL_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width: max_width.min(terminal_width()),
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// Machine-readable JSON format
    Json,
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{rendered}")
}

// ============================================================================
// Full Analysis
// ============================================================================

/// Everything the `analyze` command reports, bundled for JSON output.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    /// The built graph with all analyses attached
    pub graph: &'a DependencyGraph,
    /// Aggregate score over the cascade risks
    pub score: &'a ProjectRiskScore,
    /// Derived recommendations
    pub recommendations: &'a [String],
    /// Ranked unblock list
    pub priorities: &'a [UnblockPriority],
}

/// Print the full analysis report.
pub fn print_analysis(report: &AnalysisReport<'_>, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(report),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            print_summary_text(&mut handle, report.graph, &config)?;
            print_edges_text(&mut handle, report.graph, &config)?;
            print_cycles_text(&mut handle, &report.graph.cycles, &[], &config)?;
            print_risks_text(
                &mut handle,
                &report.graph.cascade_risks,
                report.score,
                report.recommendations,
                report.priorities,
                &config,
            )?;
            print_chains_text(&mut handle, &report.graph.blocking_chains, &config)
        }
    }
}

fn print_summary_text<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    let summary = graph.summary();
    writeln!(w, "{}", bold("Dependency graph", config))?;
    writeln!(
        w,
        "  {} node(s), {} edge(s) across {} project(s): {}",
        summary.node_count,
        summary.edge_count,
        summary.project_count,
        graph.projects.join(", ")
    )?;
    writeln!(
        w,
        "  {} blocking edge(s), {} unresolved",
        summary.blocking_edges, summary.unresolved_blocking_edges
    )?;
    writeln!(
        w,
        "  {} cycle(s), longest blocking chain {}, {} critical-path node(s)",
        summary.cycle_count, summary.longest_chain, summary.critical_node_count
    )?;

    if !graph.critical_path.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Critical path", config))?;
        for key in &graph.critical_path {
            if let Some(node) = graph.node(key) {
                writeln!(
                    w,
                    "  {} {}  {}",
                    status_icon(node.status_category, config),
                    colorize_key(key.as_str(), config),
                    dimmed(&node.summary, config)
                )?;
            }
        }
    }
    Ok(())
}

fn print_edges_text<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    if graph.edges.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Edges", config), graph.edges.len())?;
    for edge in graph.edges.iter().take(MAX_EDGE_ROWS) {
        let marker = if edge.is_blocking {
            colorize_risk(edge.risk, config)
        } else {
            dimmed("link", config)
        };
        writeln!(
            w,
            "  {} {} {} [{}] ({marker})",
            colorize_key(edge.from.as_str(), config),
            dimmed("->", config),
            colorize_key(edge.to.as_str(), config),
            edge.kind,
        )?;
    }
    if graph.edges.len() > MAX_EDGE_ROWS {
        writeln!(
            w,
            "  {}",
            dimmed(
                &format!("... and {} more", graph.edges.len() - MAX_EDGE_ROWS),
                config
            )
        )?;
    }
    Ok(())
}

// ============================================================================
// Cycles
// ============================================================================

/// Print detected cycles with optional per-cycle breaking suggestions.
///
/// `suggestions` pairs with `cycles` by index; pass an empty slice to skip.
pub fn print_cycles(
    cycles: &[Cycle],
    suggestions: &[Vec<String>],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "cycles": cycles,
            "suggestions": suggestions,
        })),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            print_cycles_text(&mut handle, cycles, suggestions, &config)
        }
    }
}

fn print_cycles_text<W: Write>(
    w: &mut W,
    cycles: &[Cycle],
    suggestions: &[Vec<String>],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w)?;
    if cycles.is_empty() {
        writeln!(w, "{}", success("No circular dependencies found.", config))?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        error(&format!("Found {} circular dependency(ies):", cycles.len()), config)
    )?;
    for (i, cycle) in cycles.iter().enumerate() {
        let rendered = cycle
            .path
            .iter()
            .map(|key| colorize_key(key.as_str(), config))
            .collect::<Vec<_>>()
            .join(&dimmed(" -> ", config));
        writeln!(w, "  {}. {rendered}", i + 1)?;
        if let Some(cycle_suggestions) = suggestions.get(i) {
            for suggestion in cycle_suggestions {
                for line in wrap_text(suggestion, config.max_width.saturating_sub(5)) {
                    writeln!(w, "     {}", dimmed(&line, config))?;
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Cascade Risks
// ============================================================================

/// Print cascade risks with score, recommendations, and unblock priorities.
pub fn print_risks(
    risks: &[CascadeRisk],
    score: &ProjectRiskScore,
    recommendations: &[String],
    priorities: &[UnblockPriority],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "risks": risks,
            "score": score,
            "recommendations": recommendations,
            "priorities": priorities,
        })),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            print_risks_text(&mut handle, risks, score, recommendations, priorities, &config)
        }
    }
}

fn print_risks_text<W: Write>(
    w: &mut W,
    risks: &[CascadeRisk],
    score: &ProjectRiskScore,
    recommendations: &[String],
    priorities: &[UnblockPriority],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "{} {}/100 ({})",
        bold("Project risk score:", config),
        score.score,
        colorize_risk(score.level, config)
    )?;
    for line in wrap_text(&score.description, config.max_width.saturating_sub(2)) {
        writeln!(w, "  {}", dimmed(&line, config))?;
    }

    if risks.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", success("No cascade risks found.", config))?;
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Cascade risks", config), risks.len())?;
    for risk in risks {
        writeln!(
            w,
            "  {} [{}] blocks {} directly, {} transitively ({} pts at risk)",
            colorize_key(risk.key.as_str(), config),
            colorize_risk(risk.level, config),
            risk.directly_blocked,
            risk.transitively_blocked,
            risk.points_at_risk,
        )?;
    }

    if !recommendations.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Recommendations", config))?;
        for recommendation in recommendations {
            for (i, line) in wrap_text(recommendation, config.max_width.saturating_sub(4))
                .into_iter()
                .enumerate()
            {
                let lead = if i == 0 { "-" } else { " " };
                writeln!(w, "  {lead} {line}")?;
            }
        }
    }

    if !priorities.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Unblock next", config))?;
        for (i, priority) in priorities.iter().enumerate() {
            writeln!(
                w,
                "  {}. {} [{}] {} blocked",
                i + 1,
                colorize_key(priority.key.as_str(), config),
                colorize_risk(priority.level, config),
                priority.transitively_blocked,
            )?;
            for line in wrap_text(&priority.recommendation, config.max_width.saturating_sub(5)) {
                writeln!(w, "     {}", dimmed(&line, config))?;
            }
        }
    }

    Ok(())
}

// ============================================================================
// Blocking Chains
// ============================================================================

/// Print the longest blocking chains.
pub fn print_chains(chains: &[BlockingChain], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({ "chains": chains })),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            print_chains_text(&mut handle, chains, &config)
        }
    }
}

fn print_chains_text<W: Write>(
    w: &mut W,
    chains: &[BlockingChain],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w)?;
    if chains.is_empty() {
        writeln!(w, "{}", success("No blocking chains found.", config))?;
        return Ok(());
    }

    writeln!(w, "{} ({}):", bold("Blocking chains", config), chains.len())?;
    for chain in chains {
        let root_marker = if chain.root_resolved {
            success("resolved", config)
        } else {
            warning("unresolved", config)
        };
        writeln!(
            w,
            "  length {} from {} ({root_marker}) to {}, {} pts at risk",
            chain.length,
            colorize_key(chain.root_blocker.as_str(), config),
            colorize_key(chain.final_blocked.as_str(), config),
            chain.points_at_risk,
        )?;
        let rendered = chain
            .path
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        for line in wrap_text(&rendered, config.max_width.saturating_sub(4)) {
            writeln!(w, "    {}", dimmed(&line, config))?;
        }
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (URLs, issue keys).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueKey, RelationshipKind, RiskLevel, StatusCategory};
    use crate::graph::GraphNode;

    fn node(key: &str) -> GraphNode {
        GraphNode {
            key: IssueKey::new(key),
            summary: "test".to_string(),
            project_key: "TEST".to_string(),
            issue_type: "Task".to_string(),
            status: "Open".to_string(),
            status_category: StatusCategory::New,
            story_points: None,
            assignee: None,
            in_degree: 0,
            out_degree: 0,
            on_critical_path: false,
            phantom: false,
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        let wrapped = wrap_text("first\n\nsecond", 40);
        assert_eq!(wrapped, vec!["first", "", "second"]);
    }

    #[test]
    fn chains_render_without_color() {
        let chain = BlockingChain {
            path: vec![IssueKey::new("A-1"), IssueKey::new("A-2")],
            length: 2,
            root_blocker: IssueKey::new("A-1"),
            final_blocked: IssueKey::new("A-2"),
            root_resolved: false,
            points_at_risk: 3.0,
        };
        let mut buffer = Vec::new();
        print_chains_text(&mut buffer, &[chain], &plain()).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains("length 2 from A-1"));
        assert!(rendered.contains("A-1 -> A-2"));
    }

    #[test]
    fn empty_graph_summary_renders() {
        let graph = DependencyGraph {
            nodes: vec![node("A-1")],
            edges: vec![],
            projects: vec!["TEST".to_string()],
            cycles: vec![],
            blocking_chains: vec![],
            cascade_risks: vec![],
            critical_path: vec![],
        };
        let mut buffer = Vec::new();
        print_summary_text(&mut buffer, &graph, &plain()).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains("1 node(s), 0 edge(s)"));
    }

    #[test]
    fn edge_rows_truncate() {
        let edges: Vec<_> = (0..30)
            .map(|i| crate::graph::GraphEdge {
                from: IssueKey::new(format!("T-{i}")),
                to: IssueKey::new(format!("T-{}", i + 1)),
                kind: RelationshipKind::Blocks,
                is_blocking: true,
                target_resolved: false,
                risk: RiskLevel::High,
            })
            .collect();
        let graph = DependencyGraph {
            nodes: vec![],
            edges,
            projects: vec![],
            cycles: vec![],
            blocking_chains: vec![],
            cascade_risks: vec![],
            critical_path: vec![],
        };
        let mut buffer = Vec::new();
        print_edges_text(&mut buffer, &graph, &plain()).unwrap();
        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains("... and 5 more"));
    }
}
