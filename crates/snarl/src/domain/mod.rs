//! Domain types for issue dependency analysis.
//!
//! This module contains the input-side model: issues as fetched from a
//! tracker, the raw link records between them, and the normalized
//! relationship vocabulary the graph engine works with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an issue (project-prefixed ticket id, e.g. "PROJ-42")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssueKey(pub String);

impl IssueKey {
    /// Create a new issue key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IssueKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Coarse workflow state of an issue.
///
/// Trackers expose many status names ("In Review", "Ready for QA", ...) but
/// group them into a small category set. The engine only branches on the
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCategory {
    /// Work has not started
    New,

    /// Work is underway
    InProgress,

    /// Work is complete
    Done,

    /// The tracker did not report a category
    #[default]
    Unknown,
}

impl StatusCategory {
    /// Whether the issue is resolved (complete)
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Direction of a link as recorded on the issue that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// The link reads from this issue toward the linked issue
    Outward,

    /// The link reads from the linked issue toward this issue
    Inward,
}

/// Normalized relationship between two issues.
///
/// Tracker APIs report free-text relationship names ("is blocked by",
/// "Cloners", ...). [`RelationshipKind::normalize`] maps them onto this
/// closed vocabulary; anything unrecognized becomes [`RelatesTo`].
///
/// [`RelatesTo`]: RelationshipKind::RelatesTo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    /// Source must finish before target can proceed
    Blocks,

    /// Source cannot proceed until target finishes
    IsBlockedBy,

    /// Source needs target (target effectively blocks source)
    DependsOn,

    /// Target needs source (source effectively blocks target)
    IsDependedOnBy,

    /// Source was copied to create target
    Clones,

    /// Source was created as a copy of target
    IsClonedBy,

    /// Source duplicates target
    Duplicates,

    /// Target duplicates source
    IsDuplicatedBy,

    /// Informational link, no ordering implied
    RelatesTo,
}

impl RelationshipKind {
    /// The four blocking-family kinds, used as the default link filter when
    /// building a graph.
    pub const BLOCKING_FAMILY: [Self; 4] = [
        Self::Blocks,
        Self::IsBlockedBy,
        Self::DependsOn,
        Self::IsDependedOnBy,
    ];

    /// Map a tracker-reported relationship name and direction onto the
    /// normalized vocabulary.
    ///
    /// Matching is case-insensitive keyword search: "block", "depend",
    /// "clone", "duplicate". Unmatched names normalize to
    /// [`RelationshipKind::RelatesTo`] regardless of direction.
    pub fn normalize(type_name: &str, direction: LinkDirection) -> Self {
        let name = type_name.to_lowercase();
        let outward = matches!(direction, LinkDirection::Outward);

        if name.contains("block") {
            if outward { Self::Blocks } else { Self::IsBlockedBy }
        } else if name.contains("depend") {
            if outward { Self::DependsOn } else { Self::IsDependedOnBy }
        } else if name.contains("clone") {
            if outward { Self::Clones } else { Self::IsClonedBy }
        } else if name.contains("duplicate") {
            if outward { Self::Duplicates } else { Self::IsDuplicatedBy }
        } else {
            Self::RelatesTo
        }
    }

    /// Whether this kind implies an ordering constraint between the issues.
    ///
    /// Both directions of the blocks and depends families count.
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            Self::Blocks | Self::IsBlockedBy | Self::DependsOn | Self::IsDependedOnBy
        )
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Blocks => "blocks",
            Self::IsBlockedBy => "is-blocked-by",
            Self::DependsOn => "depends-on",
            Self::IsDependedOnBy => "is-depended-on-by",
            Self::Clones => "clones",
            Self::IsClonedBy => "is-cloned-by",
            Self::Duplicates => "duplicates",
            Self::IsDuplicatedBy => "is-duplicated-by",
            Self::RelatesTo => "relates-to",
        };
        write!(f, "{s}")
    }
}

/// Severity of a risk finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Little or no downstream impact
    Low,

    /// Noticeable downstream impact
    Medium,

    /// Significant downstream impact
    High,

    /// Stalling this work stalls a large share of the project
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Minimal metadata a link record carries about the issue on its far end.
///
/// Used to synthesize phantom nodes for linked issues outside the analyzed
/// project set. Every field except the key is optional; tracker responses
/// frequently omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedIssueRef {
    /// Key of the linked issue
    pub key: IssueKey,

    /// Display summary, if the tracker embedded one
    #[serde(default)]
    pub summary: Option<String>,

    /// Status name, if embedded
    #[serde(default)]
    pub status: Option<String>,

    /// Status category, if embedded
    #[serde(default)]
    pub status_category: Option<StatusCategory>,

    /// Issue-type name, if embedded
    #[serde(default)]
    pub issue_type: Option<String>,
}

/// One raw link record as reported on an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLink {
    /// Tracker-reported relationship name (free text, e.g. "is blocked by")
    pub type_name: String,

    /// Direction of the link relative to the issue carrying it
    pub direction: LinkDirection,

    /// The issue on the far end of the link
    pub linked: LinkedIssueRef,
}

impl IssueLink {
    /// The normalized relationship kind of this link
    pub fn kind(&self) -> RelationshipKind {
        RelationshipKind::normalize(&self.type_name, self.direction)
    }
}

/// An issue record extended with its outbound link list.
///
/// This is the engine's sole input shape; an upstream fetcher produces it
/// and the engine trusts it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIssue {
    /// Unique key
    pub key: IssueKey,

    /// Display summary
    pub summary: String,

    /// Owning project key (e.g. "PROJ")
    pub project_key: String,

    /// Issue-type name (e.g. "Story", "Bug")
    pub issue_type: String,

    /// Status name as reported by the tracker
    pub status: String,

    /// Coarse status category
    #[serde(default)]
    pub status_category: StatusCategory,

    /// Size estimate in story points
    #[serde(default)]
    pub story_points: Option<f64>,

    /// Assignee display name
    #[serde(default)]
    pub assignee: Option<String>,

    /// Link records carried by this issue
    #[serde(default)]
    pub links: Vec<IssueLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_blocking_family() {
        assert_eq!(
            RelationshipKind::normalize("Blocks", LinkDirection::Outward),
            RelationshipKind::Blocks
        );
        assert_eq!(
            RelationshipKind::normalize("is blocked by", LinkDirection::Inward),
            RelationshipKind::IsBlockedBy
        );
        assert_eq!(
            RelationshipKind::normalize("Dependency", LinkDirection::Outward),
            RelationshipKind::DependsOn
        );
        assert_eq!(
            RelationshipKind::normalize("depends on", LinkDirection::Inward),
            RelationshipKind::IsDependedOnBy
        );
    }

    #[test]
    fn normalize_non_blocking_family() {
        assert_eq!(
            RelationshipKind::normalize("Cloners", LinkDirection::Outward),
            RelationshipKind::Clones
        );
        assert_eq!(
            RelationshipKind::normalize("Duplicate", LinkDirection::Inward),
            RelationshipKind::IsDuplicatedBy
        );
        assert_eq!(
            RelationshipKind::normalize("Polls", LinkDirection::Outward),
            RelationshipKind::RelatesTo
        );
    }

    #[test]
    fn blocking_classification() {
        for kind in RelationshipKind::BLOCKING_FAMILY {
            assert!(kind.is_blocking());
        }
        assert!(!RelationshipKind::Clones.is_blocking());
        assert!(!RelationshipKind::Duplicates.is_blocking());
        assert!(!RelationshipKind::RelatesTo.is_blocking());
    }

    #[test]
    fn risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }
}
