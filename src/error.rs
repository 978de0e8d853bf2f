//! Error types for replication curve runs
//!
//! Every variant here is fatal for a run. Malformed input lines and
//! out-of-range delays are not errors and never surface through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a replication curve run
#[derive(Error, Debug)]
pub enum ReplicationError {
    #[error("Failed to open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize run summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Result type for replication curve operations
pub type Result<T> = std::result::Result<T, ReplicationError>;
