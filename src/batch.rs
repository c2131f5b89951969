//! # Batch
//!
//! Datums waiting for the next PutMetricData request

use super::wire::MetricDatum;

/// PutMetricData accepts at most 20 datums per request
pub const MAX_BATCH_SIZE: usize = 20;

/// A batch is flushed once it holds more datums than this
pub const FLUSH_THRESHOLD: usize = MAX_BATCH_SIZE - 1;

/// Ordered datums for one request, owned by a single flush cycle
#[derive(Debug, Default)]
pub struct PendingBatch {
    datums: Vec<MetricDatum>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self {
            datums: Vec::with_capacity(MAX_BATCH_SIZE),
        }
    }

    /// Append a datum, returning true when the batch must now be flushed
    pub fn push(&mut self, datum: MetricDatum) -> bool {
        self.datums.push(datum);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.datums.len() > FLUSH_THRESHOLD
    }

    pub fn len(&self) -> usize {
        self.datums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datums.is_empty()
    }

    pub fn datums(&self) -> &[MetricDatum] {
        &self.datums
    }

    /// Drop every datum, keeping the allocation for the next request
    pub fn clear(&mut self) {
        self.datums.clear();
    }
}
