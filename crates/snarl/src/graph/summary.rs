//! Report-level aggregation over a built graph.

use crate::graph::model::{DependencyGraph, GraphSummary};

impl DependencyGraph {
    /// Fold the graph and its analyses into the counts used for reporting.
    pub fn summary(&self) -> GraphSummary {
        let blocking_edges = self.edges.iter().filter(|edge| edge.is_blocking).count();
        let unresolved_blocking_edges = self
            .edges
            .iter()
            .filter(|edge| edge.is_blocking && !edge.target_resolved)
            .count();
        let longest_chain = self
            .blocking_chains
            .iter()
            .map(|chain| chain.length)
            .max()
            .unwrap_or(0);

        GraphSummary {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            project_count: self.projects.len(),
            blocking_edges,
            unresolved_blocking_edges,
            cycle_count: self.cycles.len(),
            longest_chain,
            critical_node_count: self.critical_path.len(),
        }
    }
}
