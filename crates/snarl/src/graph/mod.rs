//! Dependency graph construction and risk analysis.
//!
//! This module is the analytical core of snarl. It turns a snapshot of
//! issues and their link records into a directed graph and derives three
//! independent analyses over it:
//!
//! - **Cycle detection** ([`cycles`]): three-color DFS over the full edge
//!   set, enumerating distinct circular dependency chains.
//! - **Cascade risk** ([`cascade`]): per-blocker blast radius over the
//!   blocking subgraph, with project-level scoring.
//! - **Blocking chains** ([`chains`]): longest uninterrupted blocking
//!   sequences from unblocked roots.
//!
//! # Graph Representation and Edge Direction Convention
//!
//! Every edge points from the issue that **carries the link record** to the
//! issue on the link's far end; the normalized [`RelationshipKind`] on the
//! edge encodes what the direction means:
//!
//! - `PROJ-1 -> PROJ-2` with kind `Blocks`: PROJ-1 blocks PROJ-2
//! - `PROJ-2 -> PROJ-1` with kind `IsBlockedBy`: PROJ-1 blocks PROJ-2
//! - `PROJ-1 -> PROJ-2` with kind `DependsOn`: PROJ-2 blocks PROJ-1
//!
//! The blocking analyses resolve "who blocks whom" from the kind tag alone;
//! the original API text is never consulted again after normalization.
//!
//! # Determinism
//!
//! Every function here is a pure, synchronous transformation. Nodes live in
//! a `Vec` in input order with a side index for lookups, adjacency lists are
//! built in edge insertion order, and no output order is ever driven by hash
//! map iteration. Two calls over the same ordered input produce identical
//! results.
//!
//! [`RelationshipKind`]: crate::domain::RelationshipKind

mod builder;
mod cascade;
mod chains;
mod cycles;
mod model;
mod summary;

pub use builder::{build_dependency_graph, GraphOptions};
pub use cascade::{
    calculate_cascade_risks, project_risk_score, risk_recommendations, unblock_priorities,
    RiskThresholds,
};
pub use chains::{find_blocking_chains, MAX_CHAIN_DEPTH};
pub use cycles::{cycle_breaking_suggestions, detect_cycles, nodes_in_cycles, would_create_cycle};
pub use model::{
    BlockingChain, CascadeRisk, Cycle, DependencyGraph, GraphEdge, GraphNode, GraphSummary,
    ProjectRiskScore, UnblockPriority,
};
