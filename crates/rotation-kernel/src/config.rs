//! Configuration types for the engine.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level engine configuration.
///
/// Controls how wide the candidate search is at each greedy step and how
/// many independent trials are spent per round. Loaded from JSON at runtime;
/// missing fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate group sampling limits
    pub sampler: SamplerConfig,

    /// Trial budgets
    pub trials: TrialConfig,
}

/// Limits for producing candidate groups from a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Pools at or below this size are enumerated exhaustively
    pub exhaustive_pool_limit: usize,

    /// Stop randomized sampling once this many distinct candidates exist
    pub max_candidates: usize,

    /// Stop randomized sampling after this many draws, distinct or not
    pub max_attempts: usize,
}

/// How many shuffled trials to run per round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Trials per round when generating a multi-round schedule
    pub schedule_trials: usize,

    /// Trials when building one round in isolation
    pub single_round_trials: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            exhaustive_pool_limit: 10,
            max_candidates: 120,
            max_attempts: 120,
        }
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            schedule_trials: 700,
            single_round_trials: 400,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sampler limits that could never yield a candidate.
    ///
    /// Zero trial budgets are accepted: they make every round unbuildable,
    /// which is a reportable outcome rather than a configuration fault.
    pub fn validate(&self) -> Result<()> {
        if self.sampler.max_candidates == 0 {
            bail!("sampler.max_candidates must be at least 1");
        }
        if self.sampler.max_attempts == 0 {
            bail!("sampler.max_attempts must be at least 1");
        }
        Ok(())
    }
}
