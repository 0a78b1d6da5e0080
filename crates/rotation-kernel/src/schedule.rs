//! Schedule builder: rounds in sequence, each biased away from earlier pairings.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::ledger::PairLedger;
use crate::round::{Participant, Round, RoundBuilder};

/// Rounds built so far and the pair history they produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// How many rounds the caller asked for
    pub requested_rounds: usize,
    /// Successfully built rounds, in order
    pub rounds: Vec<Round>,
    /// Pair history after the last round
    #[serde(skip)]
    pub ledger: PairLedger,
}

impl Schedule {
    /// True when every requested round was built.
    pub fn is_complete(&self) -> bool {
        self.rounds.len() == self.requested_rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Sum of round scores across the schedule.
    pub fn total_score(&self) -> u64 {
        self.rounds.iter().map(|r| r.score).sum()
    }
}

/// Drives the round builder across days with a fresh ledger per run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: EngineConfig,
}

impl ScheduleBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build up to `round_count` rounds, each from the full roster.
    ///
    /// Stops at the first round that cannot be built; the returned schedule
    /// is then shorter than requested, which callers check with
    /// [`Schedule::is_complete`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        round_count: usize,
        sizes: &[usize],
        rng: &mut R,
    ) -> Schedule {
        let builder = RoundBuilder::new(
            self.config.sampler.clone(),
            self.config.trials.schedule_trials,
        );
        let mut ledger = PairLedger::new();
        let mut rounds = Vec::with_capacity(round_count);

        for day in 0..round_count {
            let Some(round) = builder.build(participants, sizes, &ledger, rng) else {
                warn!(
                    day = day + 1,
                    requested = round_count,
                    "Round could not be built, stopping schedule"
                );
                break;
            };

            for group in &round.groups {
                ledger.record_group(group);
            }

            info!(
                day = day + 1,
                score = round.score,
                trials = round.trials,
                "Round scheduled"
            );
            rounds.push(round);
        }

        Schedule {
            requested_rounds: round_count,
            rounds,
            ledger,
        }
    }

    /// Build one round in isolation using the single-round trial budget.
    pub fn single_round<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        sizes: &[usize],
        ledger: &PairLedger,
        rng: &mut R,
    ) -> Option<Round> {
        RoundBuilder::new(
            self.config.sampler.clone(),
            self.config.trials.single_round_trials,
        )
        .build(participants, sizes, ledger, rng)
    }
}

/// Generate a schedule with the default engine configuration.
pub fn generate_schedule<R: Rng + ?Sized>(
    participants: &[Participant],
    round_count: usize,
    sizes: &[usize],
    rng: &mut R,
) -> Schedule {
    ScheduleBuilder::default().generate(participants, round_count, sizes, rng)
}
