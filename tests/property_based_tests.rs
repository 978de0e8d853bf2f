//! Property-based tests for the bucket aggregator and line decoder
//!
//! Core properties:
//! 1. Each entity's first record has relative time 0
//! 2. An entity contributes at most once per bucket, never past its last observation
//! 3. Out-of-range records never touch buckets
//! 4. The curve lists exactly the buckets with hits, with sum / hits averages
//! 5. The decoder never panics on arbitrary bytes

use proptest::prelude::*;
use replication_curve::aggregator::BUCKET_WIDTH_MS;
use replication_curve::{BucketAggregator, Record, BUCKET_COUNT};

/// Per-entity list of (offset_ms, count), offsets ascending
fn grouped_log() -> impl Strategy<Value = Vec<Vec<(i64, i32)>>> {
    let entity = prop::collection::vec((0i64..(30 * BUCKET_WIDTH_MS), -50i32..50), 1..12)
        .prop_map(|mut rows| {
            rows.sort_by_key(|(offset, _)| *offset);
            rows
        });
    prop::collection::vec(entity, 1..8)
}

fn records_for(log: &[Vec<(i64, i32)>], base: i64) -> Vec<Record> {
    log.iter()
        .enumerate()
        .flat_map(|(idx, rows)| {
            rows.iter()
                .map(move |(offset, count)| Record::new(format!("e{}", idx), base + offset, *count))
        })
        .collect()
}

/// Straightforward model of carry-forward accumulation
fn model_buckets(log: &[Vec<(i64, i32)>]) -> (Vec<i64>, Vec<u64>) {
    let mut sums = vec![0i64; BUCKET_COUNT];
    let mut hits = vec![0u64; BUCKET_COUNT];

    for rows in log {
        let start = rows[0].0;
        let mut held = 0i64;
        let mut filled = 0usize;
        for (offset, count) in rows {
            let minute = ((offset - start) / BUCKET_WIDTH_MS) as usize;
            while filled < minute {
                sums[filled] += held;
                hits[filled] += 1;
                filled += 1;
            }
            held = i64::from(*count);
        }
    }

    (sums, hits)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_first_record_of_each_entity_is_zero(
        log in grouped_log(),
        base in 0i64..2_000_000_000_000,
    ) {
        let expected: Vec<i64> = log
            .iter()
            .flat_map(|rows| {
                let first = rows[0].0;
                rows.iter().map(move |(offset, _)| offset - first)
            })
            .collect();

        let mut agg = BucketAggregator::new();
        let actual: Vec<i64> = records_for(&log, base)
            .iter()
            .map(|record| agg.process(record).relative_time)
            .collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(agg.entities_seen(), log.len() as u64);
    }

    #[test]
    fn prop_buckets_match_carry_forward_model(log in grouped_log()) {
        let mut agg = BucketAggregator::new();
        for record in records_for(&log, 1_600_000_000_000) {
            agg.process(&record);
        }

        let (sums, hits) = model_buckets(&log);
        for i in 0..BUCKET_COUNT {
            prop_assert_eq!(agg.bucket(i), Some((sums[i], hits[i])), "bucket {}", i);
            prop_assert!(hits[i] <= log.len() as u64);
        }
    }

    #[test]
    fn prop_curve_lists_exactly_hit_buckets(log in grouped_log()) {
        let mut agg = BucketAggregator::new();
        for record in records_for(&log, 0) {
            agg.process(&record);
        }

        let (sums, hits) = model_buckets(&log);
        let expected: Vec<(usize, f64)> = (0..BUCKET_COUNT)
            .filter(|&i| hits[i] > 0)
            .map(|i| (i, sums[i] as f64 / hits[i] as f64))
            .collect();
        let actual: Vec<(usize, f64)> = agg
            .finalize()
            .map(|p| (p.minute, p.average))
            .collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_out_of_range_records_do_not_touch_buckets(
        count in any::<i32>(),
        minutes in prop_oneof![1440i64..100_000, -100_000i64..-1],
    ) {
        let mut agg = BucketAggregator::new();
        agg.process(&Record::new("A", 0, 1));
        let point = agg.process(&Record::new("A", minutes * BUCKET_WIDTH_MS, count));

        prop_assert_eq!(point.relative_time, minutes * BUCKET_WIDTH_MS);
        prop_assert_eq!(point.count, count);
        prop_assert_eq!(agg.out_of_range(), 1);
        prop_assert_eq!(agg.finalize().count(), 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parse_line_never_panics(line in prop::collection::vec(any::<u8>(), 0..80)) {
        let _ = Record::parse_line(&line);
    }

    #[test]
    fn prop_parse_well_formed_line(
        id in "[A-Za-z0-9_-]{1,16}",
        tablet in "[a-z0-9]{1,8}",
        timestamp in any::<i64>(),
        count in any::<i32>(),
    ) {
        let line = format!("{};{};{};{}", id, tablet, timestamp, count);
        prop_assert_eq!(Record::parse_line(line.as_bytes()), Some(Record::new(id, timestamp, count)));
    }

    #[test]
    fn prop_line_without_separators_rejected(line in "[^;]{0,40}") {
        prop_assert_eq!(Record::parse_line(line.as_bytes()), None);
    }
}
