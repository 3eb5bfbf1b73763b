//! Graph construction from extended issue records.

use crate::domain::{ExtendedIssue, IssueKey, LinkedIssueRef, RelationshipKind, RiskLevel};
use crate::graph::cascade::{calculate_cascade_risks, RiskThresholds};
use crate::graph::chains::find_blocking_chains;
use crate::graph::cycles::detect_cycles;
use crate::graph::model::{DependencyGraph, GraphEdge, GraphNode};
use std::collections::HashMap;
use tracing::debug;

/// Options controlling graph construction.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Projects whose issues become graph nodes
    pub project_keys: Vec<String>,

    /// Relationship kinds to admit as edges.
    ///
    /// `None` means the default filter: the four blocking-family kinds.
    pub link_types: Option<Vec<RelationshipKind>>,

    /// Whether to run cycle detection (default true)
    pub detect_cycles: bool,

    /// Whether to run cascade-risk calculation (default true)
    pub calculate_cascade_risks: bool,
}

impl GraphOptions {
    /// Options for the given projects with both analyses enabled and the
    /// default blocking-family link filter.
    pub fn new<I, S>(project_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            project_keys: project_keys.into_iter().map(Into::into).collect(),
            link_types: None,
            detect_cycles: true,
            calculate_cascade_risks: true,
        }
    }

    fn admits(&self, kind: RelationshipKind) -> bool {
        match &self.link_types {
            Some(kinds) => kinds.contains(&kind),
            None => RelationshipKind::BLOCKING_FAMILY.contains(&kind),
        }
    }
}

/// One admitted link before its endpoints are resolved to nodes.
struct RawEdge {
    from: IssueKey,
    kind: RelationshipKind,
    linked: LinkedIssueRef,
}

/// Build the dependency graph for a snapshot and run the enabled analyses.
///
/// Issues outside `options.project_keys` are dropped; links pointing at them
/// still produce edges, backed by phantom nodes synthesized from whatever
/// metadata the link record carried (a bare placeholder when it carried
/// none). The blocking-chain finder always runs; cycle detection and cascade
/// risks honor their option flags.
pub fn build_dependency_graph(
    issues: &[ExtendedIssue],
    options: &GraphOptions,
    thresholds: &RiskThresholds,
) -> DependencyGraph {
    let retained: Vec<&ExtendedIssue> = issues
        .iter()
        .filter(|issue| options.project_keys.contains(&issue.project_key))
        .collect();

    // Admit links through the filter, accumulating degree counts as we go.
    // Out-degree lands on the issue carrying the link, in-degree on its far
    // end, whether or not that far end turns out to be in scope.
    let mut raw_edges: Vec<RawEdge> = Vec::new();
    let mut out_degree: HashMap<IssueKey, usize> = HashMap::new();
    let mut in_degree: HashMap<IssueKey, usize> = HashMap::new();

    for issue in &retained {
        for link in &issue.links {
            let kind = link.kind();
            if !options.admits(kind) {
                continue;
            }
            *out_degree.entry(issue.key.clone()).or_default() += 1;
            *in_degree.entry(link.linked.key.clone()).or_default() += 1;
            raw_edges.push(RawEdge {
                from: issue.key.clone(),
                kind,
                linked: link.linked.clone(),
            });
        }
    }

    // One node per retained issue, in input order.
    let mut nodes: Vec<GraphNode> = Vec::with_capacity(retained.len());
    let mut index: HashMap<IssueKey, usize> = HashMap::with_capacity(retained.len());

    for issue in &retained {
        index.insert(issue.key.clone(), nodes.len());
        nodes.push(GraphNode {
            key: issue.key.clone(),
            summary: issue.summary.clone(),
            project_key: issue.project_key.clone(),
            issue_type: issue.issue_type.clone(),
            status: issue.status.clone(),
            status_category: issue.status_category,
            story_points: issue.story_points,
            assignee: issue.assignee.clone(),
            in_degree: in_degree.get(&issue.key).copied().unwrap_or(0),
            out_degree: out_degree.get(&issue.key).copied().unwrap_or(0),
            on_critical_path: false,
            phantom: false,
        });
    }

    // Phantom nodes for edge targets outside the retained set. Link records
    // usually embed enough metadata to describe the far end; when they do
    // not, a bare placeholder still backs the edge so no edge dangles.
    for raw in &raw_edges {
        if index.contains_key(&raw.linked.key) {
            continue;
        }
        index.insert(raw.linked.key.clone(), nodes.len());
        nodes.push(phantom_node(
            &raw.linked,
            in_degree.get(&raw.linked.key).copied().unwrap_or(0),
            out_degree.get(&raw.linked.key).copied().unwrap_or(0),
        ));
    }

    // Finalize edges now that every endpoint resolves to a node.
    let edges: Vec<GraphEdge> = raw_edges
        .iter()
        .map(|raw| {
            let source_done = index
                .get(&raw.from)
                .is_some_and(|&i| nodes[i].status_category.is_done());
            let target_done = index
                .get(&raw.linked.key)
                .is_some_and(|&i| nodes[i].status_category.is_done());
            let is_blocking = raw.kind.is_blocking();
            GraphEdge {
                from: raw.from.clone(),
                to: raw.linked.key.clone(),
                kind: raw.kind,
                is_blocking,
                target_resolved: target_done,
                risk: edge_risk(is_blocking, source_done, target_done),
            }
        })
        .collect();

    let projects = distinct_projects(&nodes);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        projects = projects.len(),
        "dependency graph constructed"
    );

    let cycles = if options.detect_cycles {
        detect_cycles(&nodes, &edges)
    } else {
        Vec::new()
    };

    let cascade_risks = if options.calculate_cascade_risks {
        calculate_cascade_risks(&nodes, &edges, thresholds)
    } else {
        Vec::new()
    };

    let blocking_chains = find_blocking_chains(&nodes, &edges);

    // Nodes carrying a high or critical cascade risk form the critical path.
    let critical_path: Vec<IssueKey> = cascade_risks
        .iter()
        .filter(|risk| risk.level >= RiskLevel::High)
        .map(|risk| risk.key.clone())
        .collect();
    for key in &critical_path {
        if let Some(&i) = index.get(key) {
            nodes[i].on_critical_path = true;
        }
    }

    DependencyGraph {
        nodes,
        edges,
        projects,
        cycles,
        blocking_chains,
        cascade_risks,
        critical_path,
    }
}

/// Risk carried by a single edge.
///
/// Blocking edges between two unresolved issues are high risk; a blocking
/// edge whose target is already resolved but whose source is not drops to
/// medium; everything else, including all non-blocking edges, is low.
fn edge_risk(is_blocking: bool, source_done: bool, target_done: bool) -> RiskLevel {
    if !is_blocking {
        RiskLevel::Low
    } else if !source_done && !target_done {
        RiskLevel::High
    } else if !source_done {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Synthesize a minimal node for a linked issue outside the analyzed
/// projects.
fn phantom_node(linked: &LinkedIssueRef, in_degree: usize, out_degree: usize) -> GraphNode {
    let project_key = linked
        .key
        .as_str()
        .split('-')
        .next()
        .unwrap_or(linked.key.as_str())
        .to_string();
    GraphNode {
        key: linked.key.clone(),
        summary: linked
            .summary
            .clone()
            .unwrap_or_else(|| linked.key.to_string()),
        project_key,
        issue_type: linked.issue_type.clone().unwrap_or_else(|| "Unknown".to_string()),
        status: linked.status.clone().unwrap_or_else(|| "Unknown".to_string()),
        status_category: linked.status_category.unwrap_or_default(),
        story_points: None,
        assignee: None,
        in_degree,
        out_degree,
        on_critical_path: false,
        phantom: true,
    }
}

/// Distinct project keys in first-seen node order.
fn distinct_projects(nodes: &[GraphNode]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for node in nodes {
        if !seen.contains(&node.project_key) {
            seen.push(node.project_key.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusCategory;

    #[test]
    fn edge_risk_rules() {
        assert_eq!(edge_risk(false, false, false), RiskLevel::Low);
        assert_eq!(edge_risk(true, false, false), RiskLevel::High);
        assert_eq!(edge_risk(true, false, true), RiskLevel::Medium);
        assert_eq!(edge_risk(true, true, false), RiskLevel::Low);
        assert_eq!(edge_risk(true, true, true), RiskLevel::Low);
    }

    #[test]
    fn phantom_node_without_metadata_falls_back_to_key() {
        let linked = LinkedIssueRef {
            key: IssueKey::new("EXT-9"),
            summary: None,
            status: None,
            status_category: None,
            issue_type: None,
        };
        let node = phantom_node(&linked, 1, 0);
        assert_eq!(node.summary, "EXT-9");
        assert_eq!(node.project_key, "EXT");
        assert_eq!(node.status_category, StatusCategory::Unknown);
        assert!(node.phantom);
    }
}
