//! Longest blocking-chain extraction.

use crate::domain::IssueKey;
use crate::graph::cascade::blocking_adjacency;
use crate::graph::model::{BlockingChain, GraphEdge, GraphNode};

/// Maximum number of nodes in a recorded chain.
pub const MAX_CHAIN_DEPTH: usize = 10;

/// Maximum number of chains returned.
const MAX_CHAINS: usize = 10;

/// Find the longest uninterrupted blocking sequences.
///
/// Roots are nodes with no incoming blocking edge (nothing blocks them). A
/// depth-first walk extends each path through the blocker -> blocked
/// adjacency until a dead end, a repeated node, or the depth cap, recording
/// every maximal path of at least two nodes. The top [`MAX_CHAINS`] chains
/// by descending length are returned.
pub fn find_blocking_chains(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<BlockingChain> {
    let adjacency = blocking_adjacency(nodes, edges);

    let mut has_incoming = vec![false; nodes.len()];
    for targets in &adjacency {
        for &target in targets {
            has_incoming[target] = true;
        }
    }

    let mut chains: Vec<BlockingChain> = Vec::new();
    let mut path: Vec<usize> = Vec::new();

    for root in 0..nodes.len() {
        if has_incoming[root] || adjacency[root].is_empty() {
            continue;
        }
        walk(root, &adjacency, nodes, &mut path, &mut chains);
    }

    chains.sort_by(|a, b| b.length.cmp(&a.length));
    chains.truncate(MAX_CHAINS);
    chains
}

/// Extend the current path through `node`, recording maximal paths.
///
/// The depth cap bounds both the recorded chain length and the recursion
/// depth, so the recursive walk is safe here (unlike the unbounded cycle
/// DFS).
fn walk(
    node: usize,
    adjacency: &[Vec<usize>],
    nodes: &[GraphNode],
    path: &mut Vec<usize>,
    chains: &mut Vec<BlockingChain>,
) {
    path.push(node);

    let capped = path.len() >= MAX_CHAIN_DEPTH;
    let mut extended = false;
    if !capped {
        for &next in &adjacency[node] {
            if !path.contains(&next) {
                extended = true;
                walk(next, adjacency, nodes, path, chains);
            }
        }
    }

    if !extended && path.len() >= 2 {
        chains.push(record(path, nodes));
    }

    path.pop();
}

fn record(path: &[usize], nodes: &[GraphNode]) -> BlockingChain {
    let keys: Vec<IssueKey> = path.iter().map(|&i| nodes[i].key.clone()).collect();
    let root = &nodes[path[0]];
    let points_at_risk: f64 = path[1..]
        .iter()
        .filter_map(|&i| nodes[i].story_points)
        .sum();
    BlockingChain {
        length: keys.len(),
        root_blocker: root.key.clone(),
        final_blocked: keys[keys.len() - 1].clone(),
        root_resolved: root.status_category.is_done(),
        points_at_risk,
        path: keys,
    }
}
