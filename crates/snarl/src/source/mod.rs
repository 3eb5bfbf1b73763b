//! Snapshot loading for the analysis engine.
//!
//! The engine itself never performs I/O: it consumes an [`IssueSnapshot`]
//! that some upstream fetcher produced. This module defines that seam as an
//! async trait plus the one implementation snarl ships with, a JSON snapshot
//! file on disk (the shape a tracker-export or fetch script writes).
//! Network fetching, retries, and pagination belong to whatever implements
//! [`IssueSource`] against a live tracker.

use crate::domain::ExtendedIssue;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// A point-in-time capture of issues and their links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    /// When the snapshot was taken, if recorded
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,

    /// The captured issues, in the order the fetcher emitted them
    pub issues: Vec<ExtendedIssue>,
}

/// A provider of issue snapshots.
///
/// Implementations must be `Send + Sync`; the CLI holds one behind
/// `Box<dyn IssueSource>`.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch a snapshot covering (at least) the given projects.
    ///
    /// Sources return the snapshot as-is; narrowing to the requested
    /// projects is the graph builder's job.
    async fn fetch(&self, project_keys: &[String]) -> Result<IssueSnapshot>;
}

/// [`IssueSource`] backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    /// Create a source reading from the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IssueSource for JsonSnapshotSource {
    async fn fetch(&self, _project_keys: &[String]) -> Result<IssueSnapshot> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Snapshot(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let snapshot: IssueSnapshot = serde_json::from_str(&content)
            .map_err(|e| Error::Snapshot(format!("malformed snapshot: {e}")))?;
        debug!(
            path = %self.path.display(),
            issues = snapshot.issues.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
