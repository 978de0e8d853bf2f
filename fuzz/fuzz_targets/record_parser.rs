#![no_main]

use libfuzzer_sys::fuzz_target;
use replication_curve::{BucketAggregator, Record};

fuzz_target!(|data: &[u8]| {
    // Raw byte lines, as the pipeline reads them
    let mut aggregator = BucketAggregator::new();

    for line in data.split(|b| *b == b'\n') {
        if let Some(record) = Record::parse_line(line) {
            let point = aggregator.process(&record);
            assert_eq!(point.count, record.count);
        }
    }

    for point in aggregator.finalize() {
        assert!(point.minute < replication_curve::BUCKET_COUNT);
    }
});
