//! Run configuration
//!
//! Paths default to the layout of the `data/` directory the upstream export
//! writes into. A TOML file may override any of them, and command-line flags
//! override the file.
//!
//! # Example replication.toml
//!
//! ```toml
//! input_path = "exports/bundles.csv"
//! curve_output_path = "exports/curve.csv"
//! summary_path = "exports/summary.json"
//! ```

use crate::error::{ReplicationError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File locations for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplicationConfig {
    /// Semicolon-delimited event log
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Per-record `time;count` output
    #[serde(default = "default_transformed_output_path")]
    pub transformed_output_path: PathBuf,

    /// Averaged `minutes;count` output
    #[serde(default = "default_curve_output_path")]
    pub curve_output_path: PathBuf,

    /// Optional JSON run summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/test.csv")
}

fn default_transformed_output_path() -> PathBuf {
    PathBuf::from("data/replication.csv")
}

fn default_curve_output_path() -> PathBuf {
    PathBuf::from("data/replicationcurve.csv")
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            transformed_output_path: default_transformed_output_path(),
            curve_output_path: default_curve_output_path(),
            summary_path: None,
        }
    }
}

/// Values supplied on the command line, each overriding the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub transformed_output_path: Option<PathBuf>,
    pub curve_output_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

impl ReplicationConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ReplicationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replace every field that has a command-line value
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.input_path {
            self.input_path = path;
        }
        if let Some(path) = overrides.transformed_output_path {
            self.transformed_output_path = path;
        }
        if let Some(path) = overrides.curve_output_path {
            self.curve_output_path = path;
        }
        if overrides.summary_path.is_some() {
            self.summary_path = overrides.summary_path;
        }
        self
    }
}
