//! Cascade-risk calculation over the blocking subgraph.
//!
//! For every unresolved node that blocks at least one other node, a
//! breadth-first traversal collects everything transitively stalled behind
//! it. The closure size and its story-point total classify the node's risk,
//! and the per-node entries aggregate into a project-level score,
//! recommendations, and a ranked unblock list.

use crate::domain::{IssueKey, RelationshipKind, RiskLevel};
use crate::graph::model::{CascadeRisk, GraphEdge, GraphNode, ProjectRiskScore, UnblockPriority};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Cutoffs for classifying a cascade risk.
///
/// A level applies when **either** its blocked-count or its points-at-risk
/// cutoff is met; levels are tested from most to least severe and the first
/// match wins. The defaults match the built-in sensitivity; callers can
/// inject their own (or load overrides from `snarl.yaml`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Transitively-blocked count for critical
    pub critical_blocked: usize,
    /// Points-at-risk for critical
    pub critical_points: f64,
    /// Transitively-blocked count for high
    pub high_blocked: usize,
    /// Points-at-risk for high
    pub high_points: f64,
    /// Transitively-blocked count for medium
    pub medium_blocked: usize,
    /// Points-at-risk for medium
    pub medium_points: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_blocked: 10,
            critical_points: 50.0,
            high_blocked: 5,
            high_points: 20.0,
            medium_blocked: 2,
            medium_points: 10.0,
        }
    }
}

impl RiskThresholds {
    /// Classify a blast radius, most severe level first.
    pub fn classify(&self, blocked: usize, points: f64) -> RiskLevel {
        if blocked >= self.critical_blocked || points >= self.critical_points {
            RiskLevel::Critical
        } else if blocked >= self.high_blocked || points >= self.high_points {
            RiskLevel::High
        } else if blocked >= self.medium_blocked || points >= self.medium_points {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Blocker -> blocked adjacency restricted to blocking edges.
///
/// Direction is resolved from the edge's kind tag: `Blocks` and
/// `IsDependedOnBy` read source-blocks-target, `IsBlockedBy` and `DependsOn`
/// read target-blocks-source. Adjacency lists keep edge insertion order.
pub(crate) fn blocking_adjacency(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<Vec<usize>> {
    let index: HashMap<&IssueKey, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.key, i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in edges.iter().filter(|edge| edge.is_blocking) {
        let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) else {
            continue;
        };
        match edge.kind {
            RelationshipKind::Blocks | RelationshipKind::IsDependedOnBy => {
                adjacency[from].push(to);
            }
            RelationshipKind::IsBlockedBy | RelationshipKind::DependsOn => {
                adjacency[to].push(from);
            }
            _ => {}
        }
    }

    adjacency
}

/// Compute one [`CascadeRisk`] per unresolved node that blocks others.
///
/// Entries are sorted by severity (critical first), then by transitively
/// blocked count descending.
pub fn calculate_cascade_risks(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    thresholds: &RiskThresholds,
) -> Vec<CascadeRisk> {
    let adjacency = blocking_adjacency(nodes, edges);

    let mut risks: Vec<CascadeRisk> = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        if node.status_category.is_done() {
            continue;
        }

        let direct: Vec<usize> = distinct_in_order(&adjacency[i]);
        if direct.is_empty() {
            continue;
        }

        // BFS closure over the blocking subgraph. Seeding the visited set
        // with the node itself keeps it out of its own blast radius.
        let mut visited: HashSet<usize> = HashSet::from([i]);
        let mut affected: Vec<usize> = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        for &next in &direct {
            if visited.insert(next) {
                affected.push(next);
                queue.push_back(next);
            }
        }
        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if visited.insert(next) {
                    affected.push(next);
                    queue.push_back(next);
                }
            }
        }

        let points_at_risk: f64 = affected
            .iter()
            .filter_map(|&j| nodes[j].story_points)
            .sum();
        let level = thresholds.classify(affected.len(), points_at_risk);

        risks.push(CascadeRisk {
            key: node.key.clone(),
            directly_blocked: direct.len(),
            transitively_blocked: affected.len(),
            points_at_risk,
            level,
            affected: affected.iter().map(|&j| nodes[j].key.clone()).collect(),
        });
    }

    risks.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then(b.transitively_blocked.cmp(&a.transitively_blocked))
    });

    debug!(risks = risks.len(), "cascade risk calculation finished");
    risks
}

/// Weighted project-level score over all cascade risks, capped at 100.
///
/// Weights are 10/5/2/1 for critical/high/medium/low, each multiplied by the
/// entry's transitively blocked count.
pub fn project_risk_score(risks: &[CascadeRisk]) -> ProjectRiskScore {
    let raw: usize = risks
        .iter()
        .map(|risk| level_weight(risk.level) * risk.transitively_blocked)
        .sum();
    let score = u32::try_from(raw.min(100)).unwrap_or(100);

    let (level, description) = if score >= 50 {
        (
            RiskLevel::Critical,
            "Severe dependency risk: blocking chains can stall a large share of planned work",
        )
    } else if score >= 25 {
        (
            RiskLevel::High,
            "High dependency risk: several blockers have a wide blast radius",
        )
    } else if score >= 10 {
        (
            RiskLevel::Medium,
            "Moderate dependency risk: a few blockers need attention",
        )
    } else {
        (
            RiskLevel::Low,
            "Low dependency risk: blocking relationships are well contained",
        )
    };

    ProjectRiskScore {
        score,
        level,
        description: description.to_string(),
    }
}

/// Natural-language recommendations derived from the risk list.
pub fn risk_recommendations(risks: &[CascadeRisk]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let criticals: Vec<&CascadeRisk> = risks
        .iter()
        .filter(|risk| risk.level == RiskLevel::Critical)
        .collect();
    if !criticals.is_empty() {
        let detail = criticals
            .iter()
            .take(3)
            .map(|risk| {
                format!(
                    "{} ({} blocked, {} pts)",
                    risk.key, risk.transitively_blocked, risk.points_at_risk
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(format!(
            "{} issue(s) carry critical cascade risk, resolve these first: {detail}",
            criticals.len()
        ));
    }

    let high_count = risks
        .iter()
        .filter(|risk| risk.level == RiskLevel::High)
        .count();
    if high_count > 0 {
        recommendations.push(format!(
            "{high_count} issue(s) carry high cascade risk and should be scheduled ahead of dependent work"
        ));
    }

    let total_blocked: usize = risks.iter().map(|risk| risk.transitively_blocked).sum();
    if total_blocked > 20 {
        recommendations.push(format!(
            "Blocking relationships affect {total_blocked} issues in total; consider decoupling work streams"
        ));
    }

    if risks.iter().any(|risk| risk.transitively_blocked > 5) {
        recommendations.push(
            "At least one blocker stalls more than 5 issues; break long chains into independent slices"
                .to_string(),
        );
    }

    recommendations
}

/// The first `top_n` non-low risks, annotated with a fixed recommendation
/// per severity. Input order (already severity-sorted) is preserved.
pub fn unblock_priorities(risks: &[CascadeRisk], top_n: usize) -> Vec<UnblockPriority> {
    risks
        .iter()
        .filter(|risk| risk.level != RiskLevel::Low)
        .take(top_n)
        .map(|risk| UnblockPriority {
            key: risk.key.clone(),
            level: risk.level,
            transitively_blocked: risk.transitively_blocked,
            points_at_risk: risk.points_at_risk,
            recommendation: level_recommendation(risk.level).to_string(),
        })
        .collect()
}

fn level_weight(level: RiskLevel) -> usize {
    match level {
        RiskLevel::Critical => 10,
        RiskLevel::High => 5,
        RiskLevel::Medium => 2,
        RiskLevel::Low => 1,
    }
}

fn level_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => {
            "Resolve immediately; a large amount of downstream work is stalled behind this issue"
        }
        RiskLevel::High => "Prioritize in the current iteration to free up dependent work",
        RiskLevel::Medium => "Schedule soon; a few issues are waiting on this one",
        RiskLevel::Low => "Monitor; downstream impact is minimal",
    }
}

/// Deduplicate while keeping first-seen order. Mutual links can record the
/// same blocking relationship twice.
fn distinct_in_order(indices: &[usize]) -> Vec<usize> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .copied()
        .filter(|&i| seen.insert(i))
        .collect()
}
