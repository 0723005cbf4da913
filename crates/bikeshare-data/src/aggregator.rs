//! Frequency counting over categorical trip fields.
//!
//! Every "most common" figure in the statistics goes through
//! [`FrequencyTable::mode`], which breaks ties towards the smallest key.

use std::collections::BTreeMap;

// ── FrequencyTable ────────────────────────────────────────────────────────────

/// Occurrence counts per distinct value, kept in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// The most frequent value and its count.
    ///
    /// On equal counts the smallest key wins. `None` when nothing was counted.
    pub fn mode(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            // Keys arrive in ascending order, so only a strictly higher
            // count may replace the current best.
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }

    /// Smallest counted key.
    pub fn min_key(&self) -> Option<&K> {
        self.counts.keys().next()
    }

    /// Largest counted key.
    pub fn max_key(&self) -> Option<&K> {
        self.counts.keys().next_back()
    }
}

impl<K: Ord + Clone> FrequencyTable<K> {
    /// All distinct values with their counts, most frequent first; equal
    /// counts are listed in key order.
    pub fn value_counts(&self) -> Vec<(K, usize)> {
        let mut rows: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(k, &c)| (k.clone(), c))
            .collect();
        // Stable sort keeps the ascending key order among equal counts.
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

impl<K: Ord> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
