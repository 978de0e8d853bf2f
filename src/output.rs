//! Semicolon-delimited output for the transformed stream and the curve

use crate::aggregator::{CurvePoint, RelativePoint};
use crate::error::{ReplicationError, Result};
use std::io::Write;

/// Header of the per-record transformed output
pub const TRANSFORMED_HEADER: &str = "time;count";

/// Header of the averaged curve output
pub const CURVE_HEADER: &str = "minutes;count";

/// Incremental writer for `time;count` rows
#[derive(Debug)]
pub struct TransformedWriter<W: Write> {
    out: W,
}

impl<W: Write> TransformedWriter<W> {
    /// Wrap a sink and write the header row
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{}", TRANSFORMED_HEADER).map_err(ReplicationError::Write)?;
        Ok(Self { out })
    }

    /// Append one row for a processed record
    pub fn write_point(&mut self, point: &RelativePoint) -> Result<()> {
        writeln!(self.out, "{}", format_point(point)).map_err(ReplicationError::Write)
    }

    /// Flush and hand back the underlying sink
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(ReplicationError::Write)?;
        Ok(self.out)
    }
}

/// Format a transformed row
fn format_point(point: &RelativePoint) -> String {
    format!("{};{}", point.relative_time, point.count)
}

/// Format a curve row, average with six fractional digits
fn format_curve_point(point: &CurvePoint) -> String {
    format!("{};{:.6}", point.minute, point.average)
}

/// Write the header and every curve point, returning the number of points
pub fn write_curve<W, I>(mut out: W, curve: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = CurvePoint>,
{
    writeln!(out, "{}", CURVE_HEADER).map_err(ReplicationError::Write)?;

    let mut written = 0;
    for point in curve {
        writeln!(out, "{}", format_curve_point(&point)).map_err(ReplicationError::Write)?;
        written += 1;
    }

    out.flush().map_err(ReplicationError::Write)?;
    Ok(written)
}
