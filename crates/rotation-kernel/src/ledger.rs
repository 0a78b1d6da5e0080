//! Pair-history ledger: how often each pair of participants has shared a group.
//!
//! The ledger is the only state carried from one round to the next. Counts
//! only ever grow, and a pair is keyed by its lexicographically ordered
//! labels so `(a, b)` and `(b, a)` always resolve to the same entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::round::Participant;

/// Canonical unordered key for two participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    low: Participant,
    high: Participant,
}

impl PairKey {
    /// Build the key for a pair, ordering the labels lexicographically.
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = ordered(a, b);
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// The lexicographically smaller label.
    pub fn low(&self) -> &str {
        &self.low
    }

    /// The lexicographically larger label.
    pub fn high(&self) -> &str {
        &self.high
    }
}

/// Co-occurrence counts for every pair seated together so far.
///
/// Stored as `low -> high -> count` so lookups borrow the labels instead of
/// building a [`PairKey`].
#[derive(Debug, Clone, Default)]
pub struct PairLedger {
    counts: HashMap<Participant, HashMap<Participant, u32>>,
    pairs: usize,
}

impl PairLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many rounds have seated `a` and `b` together (0 if never).
    pub fn lookup(&self, a: &str, b: &str) -> u32 {
        let (low, high) = ordered(a, b);
        self.counts
            .get(low)
            .and_then(|row| row.get(high))
            .copied()
            .unwrap_or(0)
    }

    /// Record one more round in which `a` and `b` shared a group.
    pub fn increment(&mut self, a: &str, b: &str) {
        let (low, high) = ordered(a, b);
        let count = self
            .counts
            .entry(low.to_string())
            .or_default()
            .entry(high.to_string())
            .or_insert(0);
        if *count == 0 {
            self.pairs += 1;
        }
        *count += 1;
    }

    /// Increment every unordered pair within a group.
    pub fn record_group(&mut self, group: &[Participant]) {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                self.increment(a, b);
            }
        }
    }

    /// Sum of prior co-occurrence counts over all unordered pairs in a group.
    ///
    /// A score of 0 means nobody in the group has sat with anybody else in it.
    pub fn group_score(&self, group: &[Participant]) -> u64 {
        let mut score = 0u64;
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                score += u64::from(self.lookup(a, b));
            }
        }
        score
    }

    /// Number of distinct pairs that have ever shared a group.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairKey, u32)> + '_ {
        self.counts.iter().flat_map(|(low, row)| {
            row.iter()
                .map(move |(high, count)| (PairKey::new(low, high), *count))
        })
    }

    fn pair_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.values().flat_map(|row| row.values().copied())
    }

    /// Highest count of any single pair (0 for an empty ledger).
    pub fn max_count(&self) -> u32 {
        self.pair_counts().max().unwrap_or(0)
    }

    /// Number of pairs that have shared a group more than once.
    pub fn repeated_pairs(&self) -> usize {
        self.pair_counts().filter(|&count| count >= 2).count()
    }
}

fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
