//! Bounded in-memory submission store.
//!
//! Holds the most recent submissions in insertion order. Used on every
//! accepted request, whether or not the external store succeeded.

use lead_core::limits::FALLBACK_STORE_CAPACITY;
use lead_core::Submission;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// FIFO ring of submissions with a fixed capacity.
pub struct FallbackStore {
    records: Mutex<VecDeque<Submission>>,
    capacity: usize,
}

impl Default for FallbackStore {
    fn default() -> Self {
        Self::new(FALLBACK_STORE_CAPACITY)
    }
}

impl FallbackStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends a record, evicting the oldest beyond capacity.
    ///
    /// Returns the evicted record, if any.
    pub fn push(&self, submission: Submission) -> Option<Submission> {
        let mut records = self.records.lock();
        records.push_back(submission);
        if records.len() > self.capacity {
            records.pop_front()
        } else {
            None
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// The `limit` most recent records, oldest first, plus the total count.
    ///
    /// Both values come from one lock acquisition.
    pub fn recent(&self, limit: usize) -> (usize, Vec<Submission>) {
        let records = self.records.lock();
        let total = records.len();
        let skip = total.saturating_sub(limit);
        (total, records.iter().skip(skip).cloned().collect())
    }
}
