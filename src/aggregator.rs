//! Bucket aggregation of per-entity count trajectories
//!
//! Records arrive grouped by entity and in ascending time within a group.
//! Each entity's counts are laid out on a one-minute grid measured from the
//! entity's first timestamp. The last observed count is held in every minute
//! until the next in-range observation, and the per-minute values of all
//! entities are summed so the curve can report their average.
//!
//! The trailing minutes after an entity's final observation are not filled:
//! carry-forward only happens when a later record of the same entity lands
//! in a later minute.

use crate::record::Record;

/// Number of one-minute buckets (24 hours)
pub const BUCKET_COUNT: usize = 1440;

/// Bucket width in milliseconds
pub const BUCKET_WIDTH_MS: i64 = 60_000;

/// Relative position of one record inside its entity's trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativePoint {
    /// Milliseconds since the entity's first record
    pub relative_time: i64,
    /// The record's own count
    pub count: i32,
}

/// One averaged point of the final curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Minutes since first seen (bucket index)
    pub minute: usize,
    /// Mean count over all entities that reached this minute
    pub average: f64,
}

/// The entity currently being aggregated
#[derive(Debug, Clone)]
struct GroupState {
    entity_id: Vec<u8>,
    start_time: i64,
    /// First bucket not yet filled for this entity
    last_filled: usize,
    /// Count held forward from the last in-range observation
    pending_count: i32,
}

impl GroupState {
    fn start(record: &Record) -> Self {
        Self {
            entity_id: record.entity_id.clone(),
            start_time: record.timestamp,
            last_filled: 0,
            pending_count: 0,
        }
    }
}

/// Streaming single-pass aggregator
#[derive(Debug)]
pub struct BucketAggregator {
    group: Option<GroupState>,
    sums: Box<[i64; BUCKET_COUNT]>,
    hits: Box<[u64; BUCKET_COUNT]>,
    entities_seen: u64,
    out_of_range: u64,
}

impl Default for BucketAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketAggregator {
    /// Create an aggregator with all buckets empty
    pub fn new() -> Self {
        Self {
            group: None,
            sums: Box::new([0; BUCKET_COUNT]),
            hits: Box::new([0; BUCKET_COUNT]),
            entities_seen: 0,
            out_of_range: 0,
        }
    }

    /// Feed one record and return its position relative to its entity start
    ///
    /// A change of entity id always starts a fresh group, even for an id
    /// seen earlier in the stream.
    pub fn process(&mut self, record: &Record) -> RelativePoint {
        let same_entity = self
            .group
            .as_ref()
            .is_some_and(|group| group.entity_id == record.entity_id);
        if !same_entity {
            tracing::debug!(
                entity = %record.entity(),
                start_time = record.timestamp,
                "starting entity group"
            );
            self.entities_seen += 1;
            self.group = None;
        }
        let group = self
            .group
            .get_or_insert_with(|| GroupState::start(record));

        let relative_time = record.timestamp.wrapping_sub(group.start_time);
        // Integer division truncates toward zero
        let delay = relative_time / BUCKET_WIDTH_MS;

        match usize::try_from(delay) {
            Ok(delay) if delay < BUCKET_COUNT => {
                for i in group.last_filled..delay {
                    self.sums[i] += i64::from(group.pending_count);
                    self.hits[i] += 1;
                }
                group.last_filled = group.last_filled.max(delay);
                group.pending_count = record.count;
            }
            _ => {
                tracing::trace!(
                    entity = %record.entity(),
                    delay,
                    "delay outside bucket range"
                );
                self.out_of_range += 1;
            }
        }

        RelativePoint {
            relative_time,
            count: record.count,
        }
    }

    /// Sum and hit count for one bucket, `None` if the index is out of range
    pub fn bucket(&self, index: usize) -> Option<(i64, u64)> {
        Some((*self.sums.get(index)?, *self.hits.get(index)?))
    }

    /// Number of entity groups started so far
    pub fn entities_seen(&self) -> u64 {
        self.entities_seen
    }

    /// Number of records whose delay fell outside 0..1440
    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    /// Consume the aggregator and yield the averaged curve
    pub fn finalize(self) -> Curve {
        Curve {
            sums: self.sums,
            hits: self.hits,
            next: 0,
        }
    }
}

/// Averaged curve, ascending by minute, skipping buckets no entity reached
#[derive(Debug)]
pub struct Curve {
    sums: Box<[i64; BUCKET_COUNT]>,
    hits: Box<[u64; BUCKET_COUNT]>,
    next: usize,
}

impl Iterator for Curve {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        while self.next < BUCKET_COUNT {
            let minute = self.next;
            self.next += 1;

            let hits = self.hits[minute];
            if hits > 0 {
                return Some(CurvePoint {
                    minute,
                    average: self.sums[minute] as f64 / hits as f64,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(BUCKET_COUNT - self.next))
    }
}

impl std::iter::FusedIterator for Curve {}
