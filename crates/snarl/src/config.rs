//! Configuration management for snarl.
//!
//! Settings live in a `snarl.yaml` file next to the data being analyzed.
//! Everything in it can also be supplied on the command line; the file just
//! saves repeating flags, and it is the place to tune risk-threshold
//! sensitivity without touching the engine.

use crate::error::{Error, Result};
use crate::graph::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "snarl.yaml";

/// Configuration file structure for snarl
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SnarlConfig {
    /// Project keys analyzed when `--projects` is not given
    pub projects: Vec<String>,

    /// Snapshot file read when `--snapshot` is not given
    pub snapshot: Option<String>,

    /// Risk-classification cutoffs
    pub thresholds: RiskThresholds,
}

impl SnarlConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load the config file if it exists, defaults otherwise.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }
}
