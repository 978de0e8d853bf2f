//! End-to-end run: event log in, transformed stream and curve out

use crate::aggregator::BucketAggregator;
use crate::config::ReplicationConfig;
use crate::error::{ReplicationError, Result};
use crate::output::{write_curve, TransformedWriter};
use crate::record::Record;
use crate::summary::RunSummary;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Aggregator state and counters after the input is exhausted
#[derive(Debug)]
pub struct StreamOutcome {
    pub aggregator: BucketAggregator,
    pub lines_read: u64,
    pub records_accepted: u64,
}

impl StreamOutcome {
    pub fn lines_skipped(&self) -> u64 {
        self.lines_read - self.records_accepted
    }
}

/// Decode every line of `input`, feed the aggregator and emit transformed rows
///
/// Lines that do not decode are skipped and never reach the aggregator.
pub fn process_stream<R, W>(
    mut input: R,
    transformed: &mut TransformedWriter<W>,
) -> Result<StreamOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut aggregator = BucketAggregator::new();
    let mut lines_read = 0;
    let mut records_accepted = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .map_err(ReplicationError::Read)?;
        if n == 0 {
            break;
        }
        lines_read += 1;

        let mut line = buf.as_slice();
        while let [rest @ .., b'\r' | b'\n'] = line {
            line = rest;
        }

        let Some(record) = Record::parse_line(line) else {
            tracing::trace!(
                line_number = lines_read,
                line = %String::from_utf8_lossy(line),
                "skipping malformed line"
            );
            continue;
        };

        let point = aggregator.process(&record);
        transformed.write_point(&point)?;
        records_accepted += 1;
    }

    Ok(StreamOutcome {
        aggregator,
        lines_read,
        records_accepted,
    })
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ReplicationError::OpenInput {
            path: path.to_path_buf(),
            source,
        })
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ReplicationError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the whole pipeline for one configuration
///
/// The input and the transformed output are opened before the first line is
/// read. The curve file is only created once the input has been consumed, so
/// a failed run leaves any earlier curve untouched.
pub fn run(config: &ReplicationConfig) -> Result<RunSummary> {
    tracing::info!(
        input = %config.input_path.display(),
        transformed = %config.transformed_output_path.display(),
        curve = %config.curve_output_path.display(),
        "starting replication curve run"
    );

    let input = open_input(&config.input_path)?;
    let transformed_file = create_output(&config.transformed_output_path)?;

    let mut transformed = TransformedWriter::new(transformed_file)?;
    let outcome = process_stream(input, &mut transformed)?;
    transformed.finish()?;

    let lines_skipped = outcome.lines_skipped();
    let StreamOutcome {
        aggregator,
        lines_read,
        records_accepted,
    } = outcome;
    let entities = aggregator.entities_seen();
    let out_of_range = aggregator.out_of_range();

    let curve_file = create_output(&config.curve_output_path)?;
    let curve_points = write_curve(curve_file, aggregator.finalize())?;

    let summary = RunSummary {
        lines_read,
        records_accepted,
        lines_skipped,
        entities,
        out_of_range,
        curve_points,
    };

    if let Some(path) = &config.summary_path {
        summary.write_json(path)?;
    }

    tracing::info!(
        lines_read = summary.lines_read,
        records = summary.records_accepted,
        skipped = summary.lines_skipped,
        entities = summary.entities,
        out_of_range = summary.out_of_range,
        curve_points = summary.curve_points,
        "replication curve run complete"
    );

    Ok(summary)
}
