//! Frequency counting of quantized colors
//!
//! Counts are keyed by packed 24-bit RGB. Entries keep the order in which
//! their key was first recorded, so ranking with a stable sort breaks ties
//! by first appearance in the scan.

use rustc_hash::FxHashMap;

/// Order-preserving color frequency table for a single extraction
#[derive(Debug, Default)]
pub struct ColorBucket {
    index: FxHashMap<u32, usize>,
    entries: Vec<(u32, usize)>,
    total: usize,
}

impl ColorBucket {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bucket sized for `capacity` distinct colors
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: Vec::with_capacity(capacity),
            total: 0,
        }
    }

    /// Count one occurrence of `key`
    #[inline]
    pub fn record(&mut self, key: u32) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
        self.total += 1;
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded occurrences across all keys
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count for `key`, zero if never recorded
    pub fn count(&self, key: u32) -> usize {
        self.index
            .get(&key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Consume the bucket into at most `limit` `(key, count)` pairs,
    /// most frequent first, ties in first-seen order
    pub fn into_ranked(self, limit: usize) -> Vec<(u32, usize)> {
        let mut entries = self.entries;
        // stable: equal counts keep insertion order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}
