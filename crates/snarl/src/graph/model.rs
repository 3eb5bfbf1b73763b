//! Value types produced by the graph engine.

use crate::domain::{IssueKey, RelationshipKind, RiskLevel, StatusCategory};
use serde::{Deserialize, Serialize};

/// One work item participating in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique issue key
    pub key: IssueKey,

    /// Display summary
    pub summary: String,

    /// Owning project key
    pub project_key: String,

    /// Issue-type name
    pub issue_type: String,

    /// Status name
    pub status: String,

    /// Coarse status category
    pub status_category: StatusCategory,

    /// Size estimate in story points
    pub story_points: Option<f64>,

    /// Assignee display name
    pub assignee: Option<String>,

    /// Number of edges pointing at this node
    pub in_degree: usize,

    /// Number of edges leaving this node
    pub out_degree: usize,

    /// Whether this node appears in a high or critical cascade-risk entry
    pub on_critical_path: bool,

    /// Whether this node was synthesized for a linked issue outside the
    /// analyzed project set
    pub phantom: bool,
}

impl GraphNode {
    /// Total number of edges referencing this node
    pub fn degree(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// One directed relationship between two node keys.
///
/// Direction convention: `from` is the issue that carried the link record,
/// `to` is the issue on the link's far end. What the direction *means* is
/// encoded by `kind` (see the module docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node key
    pub from: IssueKey,

    /// Target node key
    pub to: IssueKey,

    /// Normalized relationship kind
    pub kind: RelationshipKind,

    /// Whether this relationship constrains ordering of work
    pub is_blocking: bool,

    /// Whether the target node's status category is done
    pub target_resolved: bool,

    /// Risk carried by this edge (always low for non-blocking kinds)
    pub risk: RiskLevel,
}

/// A closed walk through the graph: a circular dependency.
///
/// The path starts and ends on the same key, so the minimal two-node mutual
/// cycle has length 3 (`A, B, A`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Node keys along the cycle; first and last entries are identical
    pub path: Vec<IssueKey>,

    /// Element count of `path`, including the repeated closing key
    pub length: usize,

    /// Human-readable rendering of the cycle
    pub description: String,
}

/// An uninterrupted sequence of blocking relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingChain {
    /// Node keys from the root blocker to the final blocked item
    pub path: Vec<IssueKey>,

    /// Number of nodes in the chain
    pub length: usize,

    /// First key in the chain (nothing blocks it)
    pub root_blocker: IssueKey,

    /// Last key in the chain
    pub final_blocked: IssueKey,

    /// Whether the root blocker is already resolved
    pub root_resolved: bool,

    /// Summed story points of every node after the root
    pub points_at_risk: f64,
}

/// Blast-radius assessment for one blocking node.
///
/// Only produced for nodes that are not done and block at least one other
/// node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeRisk {
    /// The blocking node
    pub key: IssueKey,

    /// Count of nodes it blocks directly
    pub directly_blocked: usize,

    /// Count of nodes it blocks transitively (BFS closure, excluding itself)
    pub transitively_blocked: usize,

    /// Summed story points of all transitively blocked nodes
    pub points_at_risk: f64,

    /// Severity classification
    pub level: RiskLevel,

    /// Keys of all transitively blocked nodes, in traversal order
    pub affected: Vec<IssueKey>,
}

/// Aggregate risk posture for the analyzed projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRiskScore {
    /// Weighted score, capped at 100
    pub score: u32,

    /// Qualitative band for the score
    pub level: RiskLevel,

    /// Fixed description for the band
    pub description: String,
}

/// One entry in the ranked unblock-priority list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnblockPriority {
    /// The blocking node
    pub key: IssueKey,

    /// Severity of its cascade risk
    pub level: RiskLevel,

    /// Count of transitively blocked nodes
    pub transitively_blocked: usize,

    /// Story points waiting behind this node
    pub points_at_risk: f64,

    /// Fixed recommendation for this severity
    pub recommendation: String,
}

/// Counts folded out of a graph for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Total node count
    pub node_count: usize,

    /// Total edge count
    pub edge_count: usize,

    /// Distinct project keys represented
    pub project_count: usize,

    /// Count of blocking edges
    pub blocking_edges: usize,

    /// Count of blocking edges whose target is not yet resolved
    pub unresolved_blocking_edges: usize,

    /// Count of distinct cycles found
    pub cycle_count: usize,

    /// Length of the longest blocking chain
    pub longest_chain: usize,

    /// Count of critical-path nodes
    pub critical_node_count: usize,
}

/// The full analysis result for one snapshot.
///
/// Produced fresh on every [`build_dependency_graph`] call; holds no state
/// between invocations.
///
/// [`build_dependency_graph`]: crate::graph::build_dependency_graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// All nodes, in input order (phantom nodes follow real ones)
    pub nodes: Vec<GraphNode>,

    /// All edges, in creation order
    pub edges: Vec<GraphEdge>,

    /// Distinct project keys, in first-seen order
    pub projects: Vec<String>,

    /// Circular dependencies, sorted by ascending length
    pub cycles: Vec<Cycle>,

    /// Longest blocking chains, sorted by descending length
    pub blocking_chains: Vec<BlockingChain>,

    /// Per-blocker cascade risks, sorted by severity then blast radius
    pub cascade_risks: Vec<CascadeRisk>,

    /// Keys of nodes carrying high or critical cascade risk
    pub critical_path: Vec<IssueKey>,
}

impl DependencyGraph {
    /// Look up a node by key.
    pub fn node(&self, key: &IssueKey) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.key == key)
    }
}
