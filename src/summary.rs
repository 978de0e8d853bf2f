//! Counters describing one run, with JSON export

use crate::error::{ReplicationError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What a run consumed and produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Input lines read, including skipped ones
    pub lines_read: u64,
    /// Lines decoded into records and written to the transformed output
    pub records_accepted: u64,
    /// Lines that did not decode
    pub lines_skipped: u64,
    /// Entity groups started (a reappearing id counts again)
    pub entities: u64,
    /// Records whose delay fell outside the 24 hour range
    pub out_of_range: u64,
    /// Rows written to the curve output
    pub curve_points: usize,
}

impl RunSummary {
    /// Write the JSON summary to a file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReplicationError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(ReplicationError::Write)?;
        writer.flush().map_err(ReplicationError::Write)?;
        Ok(())
    }
}
