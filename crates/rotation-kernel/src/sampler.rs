//! Candidate group sampler.
//!
//! Produces the set of groups the round builder scores at each greedy step.
//! Small pools are enumerated exhaustively; larger pools are sampled at
//! random with de-duplication on sorted membership, bounded by two
//! independent counters (distinct candidates found, draws made).

use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;

use crate::config::SamplerConfig;
use crate::round::{Group, Participant};

/// How candidates are produced for a given pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// Every combination of the requested size, exactly once
    Exhaustive,
    /// Random draws without replacement, de-duplicated
    Randomized,
}

/// Produces candidate groups of a fixed size from a pool.
#[derive(Debug, Clone, Default)]
pub struct GroupSampler {
    config: SamplerConfig,
}

impl GroupSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Policy that applies to a pool of `pool_len` participants.
    pub fn policy_for(&self, pool_len: usize) -> SamplingPolicy {
        if pool_len <= self.config.exhaustive_pool_limit {
            SamplingPolicy::Exhaustive
        } else {
            SamplingPolicy::Randomized
        }
    }

    /// Candidate groups of `size` drawn from `pool`.
    ///
    /// Empty only when the pool is smaller than `size`. Exhaustive candidates
    /// come in lexicographic index order; randomized ones in draw order.
    pub fn candidates<R: Rng + ?Sized>(
        &self,
        pool: &[Participant],
        size: usize,
        rng: &mut R,
    ) -> Vec<Group> {
        if pool.len() < size {
            return Vec::new();
        }

        match self.policy_for(pool.len()) {
            SamplingPolicy::Exhaustive => combinations(pool, size),
            SamplingPolicy::Randomized => self.sample_distinct(pool, size, rng),
        }
    }

    fn sample_distinct<R: Rng + ?Sized>(
        &self,
        pool: &[Participant],
        size: usize,
        rng: &mut R,
    ) -> Vec<Group> {
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut candidates = Vec::new();
        let mut attempts = 0;

        while seen.len() < self.config.max_candidates && attempts < self.config.max_attempts {
            attempts += 1;

            let draw = index::sample(rng, pool.len(), size).into_vec();

            // Labels are unique within a pool, so sorted indices identify membership
            let mut signature = draw.clone();
            signature.sort_unstable();

            if seen.insert(signature) {
                candidates.push(draw.into_iter().map(|i| pool[i].clone()).collect());
            }
        }

        candidates
    }
}

/// All `k`-combinations of `pool`, in lexicographic order of indices.
pub fn combinations(pool: &[Participant], k: usize) -> Vec<Group> {
    let n = pool.len();
    if k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        result.push(indices.iter().map(|&i| pool[i].clone()).collect());

        // Rightmost index that can still advance
        let Some(pos) = (0..k).rev().find(|&i| indices[i] != i + n - k) else {
            break;
        };
        indices[pos] += 1;
        for i in pos + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool(n: usize) -> Vec<Participant> {
        (0..n).map(|i| format!("p{:02}", i)).collect()
    }

    fn signature(group: &Group) -> Vec<String> {
        let mut members = group.clone();
        members.sort();
        members
    }

    #[test]
    fn test_combinations_count_and_order() {
        let combos = combinations(&pool(5), 3);
        assert_eq!(combos.len(), 10);
        assert_eq!(combos[0], vec!["p00", "p01", "p02"]);
        assert_eq!(combos[1], vec!["p00", "p01", "p03"]);
        assert_eq!(combos[9], vec!["p02", "p03", "p04"]);
    }

    #[test]
    fn test_combinations_edge_sizes() {
        assert_eq!(combinations(&pool(4), 4), vec![pool(4)]);
        assert_eq!(combinations(&pool(4), 0), vec![Vec::<String>::new()]);
        assert!(combinations(&pool(2), 3).is_empty());
    }

    #[test]
    fn test_policy_threshold() {
        let sampler = GroupSampler::default();
        assert_eq!(sampler.policy_for(10), SamplingPolicy::Exhaustive);
        assert_eq!(sampler.policy_for(11), SamplingPolicy::Randomized);
    }

    #[test]
    fn test_small_pool_is_exhaustive() {
        let sampler = GroupSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let candidates = sampler.candidates(&pool(10), 5, &mut rng);

        // 10 choose 5
        assert_eq!(candidates.len(), 252);
        let distinct: HashSet<Vec<String>> = candidates.iter().map(signature).collect();
        assert_eq!(distinct.len(), 252);
    }

    #[test]
    fn test_large_pool_is_bounded_and_distinct() {
        let sampler = GroupSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let members = pool(25);
        let candidates = sampler.candidates(&members, 5, &mut rng);

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= 120);

        let distinct: HashSet<Vec<String>> = candidates.iter().map(signature).collect();
        assert_eq!(distinct.len(), candidates.len());

        for candidate in &candidates {
            assert_eq!(candidate.len(), 5);
            let unique: HashSet<&String> = candidate.iter().collect();
            assert_eq!(unique.len(), 5);
            assert!(candidate.iter().all(|p| members.contains(p)));
        }
    }

    #[test]
    fn test_attempt_limit_caps_small_spaces() {
        // 11 singletons exist, so far fewer than 120 distinct draws are possible
        let sampler = GroupSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let candidates = sampler.candidates(&pool(11), 1, &mut rng);

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= 11);
    }

    #[test]
    fn test_attempt_limit_is_independent_of_candidate_limit() {
        // C(30, 6) is huge, so only the draw counter can stop this
        let sampler = GroupSampler::new(SamplerConfig {
            exhaustive_pool_limit: 10,
            max_candidates: 120,
            max_attempts: 3,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let candidates = sampler.candidates(&pool(30), 6, &mut rng);

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= 3);
    }

    #[test]
    fn test_candidate_limit_stops_early() {
        let sampler = GroupSampler::new(SamplerConfig {
            exhaustive_pool_limit: 10,
            max_candidates: 5,
            max_attempts: 120,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let candidates = sampler.candidates(&pool(30), 6, &mut rng);
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_pool_smaller_than_size_is_empty() {
        let sampler = GroupSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(sampler.candidates(&pool(4), 5, &mut rng).is_empty());
        assert!(sampler.candidates(&pool(0), 1, &mut rng).is_empty());
    }
}
