//! Cycle detection over the full edge set.
//!
//! Enumeration uses a three-color depth-first search driven by an explicit
//! work stack, so arbitrarily deep graphs cannot exhaust the call stack. The
//! standalone reachability check ([`would_create_cycle`]) answers "would
//! inserting this edge close a loop?" before an edge exists, using
//! petgraph's path connectivity.

use crate::domain::IssueKey;
use crate::graph::model::{Cycle, GraphEdge, GraphNode};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Enumerate every distinct cycle in the graph.
///
/// All edges participate, not just blocking ones: a circular chain of
/// duplicate links is still a modeling problem worth surfacing. Cycles are
/// deduplicated on their canonical rotation (path rotated so its smallest
/// key leads), so the same loop rediscovered from a different starting node
/// collapses to one entry while genuinely different traversals of the same
/// node set stay distinct. Results are sorted by ascending length.
pub fn detect_cycles(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<Cycle> {
    let index: HashMap<&IssueKey, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.key, i))
        .collect();

    // Adjacency in edge insertion order keeps traversal deterministic.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in edges {
        if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
            adjacency[from].push(to);
        }
    }

    let mut color = vec![Color::White; nodes.len()];
    let mut position: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut path: Vec<usize> = Vec::new();
    let mut seen: HashSet<Vec<IssueKey>> = HashSet::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    // Start from every still-white node to cover disconnected components.
    for start in 0..nodes.len() {
        if color[start] != Color::White {
            continue;
        }

        // Each frame is (node, next adjacency slot), mirroring the recursive
        // visit without recursion.
        let mut stack: Vec<(usize, usize)> = Vec::new();
        color[start] = Color::Gray;
        position[start] = Some(path.len());
        path.push(start);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if frame.1 < adjacency[node].len() {
                let next = adjacency[node][frame.1];
                frame.1 += 1;
                match color[next] {
                    Color::White => {
                        color[next] = Color::Gray;
                        position[next] = Some(path.len());
                        path.push(next);
                        stack.push((next, 0));
                    }
                    Color::Gray => {
                        // Back edge: the current path from `next` onward,
                        // closed by repeating `next`, is a cycle.
                        if let Some(entry) = position[next] {
                            let mut keys: Vec<IssueKey> = path[entry..]
                                .iter()
                                .map(|&i| nodes[i].key.clone())
                                .collect();
                            keys.push(nodes[next].key.clone());
                            if seen.insert(canonical_rotation(&keys)) {
                                cycles.push(make_cycle(keys));
                            }
                        }
                    }
                    Color::Black => {}
                }
            } else {
                stack.pop();
                color[node] = Color::Black;
                position[node] = None;
                path.pop();
            }
        }
    }

    cycles.sort_by_key(|cycle| cycle.length);
    debug!(cycles = cycles.len(), "cycle detection finished");
    cycles
}

/// Whether inserting the edge `from -> to` would create a cycle.
///
/// True exactly when `from` is already reachable from `to` over the existing
/// edges. Unknown keys cannot close a loop and return false.
pub fn would_create_cycle(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    from: &IssueKey,
    to: &IssueKey,
) -> bool {
    let mut graph: DiGraph<(), ()> = DiGraph::new();
    let mut index: HashMap<&IssueKey, NodeIndex> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        index.insert(&node.key, graph.add_node(()));
    }
    for edge in edges {
        if let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) {
            graph.add_edge(a, b, ());
        }
    }

    let (Some(&from_node), Some(&to_node)) = (index.get(from), index.get(to)) else {
        return false;
    };

    // A path to -> from plus the candidate edge from -> to closes a loop.
    algo::has_path_connecting(&graph, to_node, from_node, None)
}

/// Every node key that participates in at least one cycle.
pub fn nodes_in_cycles(cycles: &[Cycle]) -> HashSet<IssueKey> {
    cycles
        .iter()
        .flat_map(|cycle| cycle.path.iter().cloned())
        .collect()
}

/// Suggest how to break one cycle.
///
/// Removing a non-blocking link is always the cheapest fix, so one is
/// recommended when the cycle contains any. Otherwise the cycle is pure
/// blocking structure and needs restructuring; the blocking edge carrying
/// the highest risk is surfaced as the candidate to re-examine. Two-node
/// cycles get an extra note since mutual dependencies are often avoidable.
pub fn cycle_breaking_suggestions(cycle: &Cycle, edges: &[GraphEdge]) -> Vec<String> {
    let mut suggestions = Vec::new();

    let cycle_edges: Vec<&GraphEdge> = cycle
        .path
        .windows(2)
        .filter_map(|pair| {
            edges
                .iter()
                .find(|edge| edge.from == pair[0] && edge.to == pair[1])
        })
        .collect();

    if let Some(edge) = cycle_edges.iter().find(|edge| !edge.is_blocking) {
        suggestions.push(format!(
            "Remove the non-blocking '{}' link from {} to {} to break the cycle",
            edge.kind, edge.from, edge.to
        ));
    } else {
        suggestions.push(
            "Every link in this cycle is blocking; the work itself needs restructuring"
                .to_string(),
        );
        let riskiest = cycle_edges
            .iter()
            .filter(|edge| edge.is_blocking)
            .max_by_key(|edge| edge.risk);
        if let Some(edge) = riskiest {
            suggestions.push(format!(
                "Re-examine the '{}' link from {} to {}; it carries the highest risk in the cycle",
                edge.kind, edge.from, edge.to
            ));
        }
    }

    // Minimal mutual cycle: A, B, A.
    if cycle.length == 3 {
        suggestions.push(
            "These two issues depend on each other; mutual dependencies can usually be merged or split"
                .to_string(),
        );
    }

    suggestions
}

/// Rotate the cycle path (closing element dropped) so its lexicographically
/// smallest key leads. Used as the deduplication key.
fn canonical_rotation(keys: &[IssueKey]) -> Vec<IssueKey> {
    let open = &keys[..keys.len() - 1];
    let pivot = open
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let mut rotated = Vec::with_capacity(open.len());
    rotated.extend_from_slice(&open[pivot..]);
    rotated.extend_from_slice(&open[..pivot]);
    rotated
}

fn make_cycle(path: Vec<IssueKey>) -> Cycle {
    let rendered = path
        .iter()
        .map(IssueKey::as_str)
        .collect::<Vec<_>>()
        .join(" -> ");
    Cycle {
        length: path.len(),
        description: format!("Circular dependency: {rendered}"),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<IssueKey> {
        raw.iter().map(|k| IssueKey::new(*k)).collect()
    }

    #[test]
    fn canonical_rotation_is_start_independent() {
        let a = keys(&["B-1", "C-1", "A-1", "B-1"]);
        let b = keys(&["C-1", "A-1", "B-1", "C-1"]);
        assert_eq!(canonical_rotation(&a), canonical_rotation(&b));
    }

    #[test]
    fn canonical_rotation_preserves_traversal_order() {
        // Same node set, different edge order: must stay distinct.
        let a = keys(&["A-1", "B-1", "C-1", "A-1"]);
        let b = keys(&["A-1", "C-1", "B-1", "A-1"]);
        assert_ne!(canonical_rotation(&a), canonical_rotation(&b));
    }
}
