//! Rolling per-building history of free-seat samples.
//!
//! DESIGN
//! ======
//! One `VecDeque` per key, same shape as the sliding windows in the rate
//! limiter: push to the back, evict from the front. Buffers never interact.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// 30 minutes of samples at one sample per 10 s fetch.
pub const DEFAULT_HISTORY_CAPACITY: usize = 180;

#[derive(Debug, Clone)]
pub struct HistoryAggregator<K> {
    capacity: usize,
    buffers: HashMap<K, VecDeque<u32>>,
}

impl<K: Eq + Hash> HistoryAggregator<K> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity, buffers: HashMap::new() }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest ones beyond capacity.
    pub fn append(&mut self, key: K, value: u32) {
        let buffer = self.buffers.entry(key).or_default();
        buffer.push_back(value);
        while buffer.len() > self.capacity {
            buffer.pop_front();
        }
    }

    /// Samples for `key`, oldest first. Empty for keys never appended to.
    #[must_use]
    pub fn series(&self, key: &K) -> Vec<u32> {
        self.buffers
            .get(key)
            .map(|buffer| buffer.iter().copied().collect())
            .unwrap_or_default()
    }

    /// `(index, value)` pairs for a line chart, index 0 being the oldest.
    #[must_use]
    pub fn chart_points(&self, key: &K) -> Vec<(usize, u32)> {
        self.buffers
            .get(key)
            .map(|buffer| buffer.iter().copied().enumerate().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self, key: &K) -> usize {
        self.buffers.get(key).map_or(0, VecDeque::len)
    }

    #[must_use]
    pub fn is_empty(&self, key: &K) -> bool {
        self.len(key) == 0
    }
}

impl<K: Eq + Hash> Default for HistoryAggregator<K> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
