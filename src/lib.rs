//! replication-curve - averaged replication curves from grouped event logs
//!
//! Reads a semicolon-delimited log of `(entity, timestamp, count)` records,
//! grouped by entity and ordered by time within each group. Every record is
//! re-expressed relative to its entity's first timestamp, and the counts of
//! all entities are carried forward on a one-minute grid and averaged over
//! the first 24 hours.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod summary;

pub use aggregator::{BucketAggregator, Curve, CurvePoint, RelativePoint, BUCKET_COUNT};
pub use config::ReplicationConfig;
pub use error::{ReplicationError, Result};
pub use record::Record;
pub use summary::RunSummary;
