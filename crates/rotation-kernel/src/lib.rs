//! Rotation Kernel: round-by-round group assignment with pairing memory.
//!
//! Seats a roster into fixed-size groups for a sequence of rounds so that
//! pairs who already shared a group are unlikely to share one again.
//!
//! ## Pipeline
//!
//! 1. [`PairLedger`] counts how often each pair has been seated together
//! 2. [`GroupSampler`] offers candidate groups from the unseated pool
//! 3. [`RoundBuilder`] greedily picks the cheapest candidate per size, over
//!    many shuffled trials, keeping the best full partition
//! 4. [`ScheduleBuilder`] repeats this per round and feeds each result back
//!    into the ledger
//!
//! The search is a bounded heuristic. A round that cannot be built is
//! reported as `None`, never as an error.

pub mod config;
pub mod ledger;
pub mod round;
pub mod sampler;
pub mod schedule;

pub use config::{EngineConfig, SamplerConfig, TrialConfig};
pub use ledger::{PairKey, PairLedger};
pub use round::{build_round, greedy_partition, Group, Participant, Round, RoundBuilder};
pub use sampler::{combinations, GroupSampler, SamplingPolicy};
pub use schedule::{generate_schedule, Schedule, ScheduleBuilder};
