//! Round builder: partition the whole roster into groups for one day.
//!
//! Two layers:
//! - [`greedy_partition`] walks the size list in order, scores every
//!   candidate against the ledger and keeps the cheapest. Given a fixed
//!   candidate source it is fully deterministic.
//! - [`RoundBuilder::build`] restarts the greedy layer on freshly shuffled
//!   pools for a bounded number of trials and keeps the best partition,
//!   stopping as soon as a trial scores 0.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SamplerConfig;
use crate::ledger::PairLedger;
use crate::sampler::GroupSampler;

/// An opaque participant label.
///
/// Labels must be unique within a roster; `table_rotation::Roster::validate`
/// enforces this for normalized input.
pub type Participant = String;

/// Participants seated together for one round.
pub type Group = Vec<Participant>;

/// A complete partition of the roster for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Groups in the order of the size list they were built from
    pub groups: Vec<Group>,
    /// Sum of group scores against the ledger as it stood when built
    pub score: u64,
    /// Trials consumed before this partition was accepted
    #[serde(default)]
    pub trials: usize,
}

impl Round {
    /// Every participant seated in this round, in group order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.groups.iter().flatten()
    }
}

/// Greedily partition `pool` into groups matching `sizes`.
///
/// For each size, `candidate_source(remaining_pool, size)` supplies the
/// options; the lowest-scoring candidate wins and ties go to the earliest
/// candidate. Returns `None` if a size cannot be met, the source offers no
/// candidates, or participants are left unseated at the end.
pub fn greedy_partition<F>(
    mut pool: Vec<Participant>,
    sizes: &[usize],
    ledger: &PairLedger,
    mut candidate_source: F,
) -> Option<Round>
where
    F: FnMut(&[Participant], usize) -> Vec<Group>,
{
    let mut groups = Vec::with_capacity(sizes.len());
    let mut score = 0u64;

    for &size in sizes {
        if pool.len() < size {
            return None;
        }

        let candidates = candidate_source(&pool, size);
        let (chosen, chosen_score) = candidates
            .into_iter()
            .map(|candidate| {
                let s = ledger.group_score(&candidate);
                (candidate, s)
            })
            .min_by_key(|(_, s)| *s)?;

        for member in &chosen {
            if let Some(pos) = pool.iter().position(|p| p == member) {
                pool.remove(pos);
            }
        }
        score += chosen_score;
        groups.push(chosen);
    }

    if !pool.is_empty() {
        return None;
    }

    Some(Round {
        groups,
        score,
        trials: 1,
    })
}

/// Runs bounded shuffled trials of [`greedy_partition`] and keeps the best.
#[derive(Debug, Clone)]
pub struct RoundBuilder {
    sampler: GroupSampler,
    trials: usize,
}

impl RoundBuilder {
    pub fn new(sampler_config: SamplerConfig, trials: usize) -> Self {
        Self {
            sampler: GroupSampler::new(sampler_config),
            trials,
        }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Build one round for `participants` against the current ledger.
    ///
    /// Returns `None` when no trial produces a full partition, including when
    /// `sizes` does not sum to the roster size or the trial budget is 0.
    pub fn build<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        sizes: &[usize],
        ledger: &PairLedger,
        rng: &mut R,
    ) -> Option<Round> {
        let seats: usize = sizes.iter().sum();
        if seats != participants.len() {
            debug!(
                participants = participants.len(),
                seats,
                "Group sizes do not cover the roster"
            );
            return None;
        }

        let mut best: Option<Round> = None;

        for trial in 1..=self.trials {
            let mut pool = participants.to_vec();
            pool.shuffle(rng);

            let Some(mut round) = greedy_partition(pool, sizes, ledger, |pool, size| {
                self.sampler.candidates(pool, size, &mut *rng)
            }) else {
                continue;
            };

            if best.as_ref().is_none_or(|b| round.score < b.score) {
                round.trials = trial;
                let perfect = round.score == 0;
                best = Some(round);
                if perfect {
                    break;
                }
            }
        }

        match &best {
            Some(round) => debug!(
                score = round.score,
                trials = round.trials,
                budget = self.trials,
                "Round built"
            ),
            None => debug!(budget = self.trials, "No trial produced a full round"),
        }

        best
    }
}

/// Build a single round with an explicit trial budget.
pub fn build_round<R: Rng + ?Sized>(
    participants: &[Participant],
    sizes: &[usize],
    ledger: &PairLedger,
    trial_budget: usize,
    rng: &mut R,
) -> Option<Round> {
    RoundBuilder::new(SamplerConfig::default(), trial_budget).build(
        participants,
        sizes,
        ledger,
        rng,
    )
}
