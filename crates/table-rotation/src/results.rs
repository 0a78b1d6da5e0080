//! Schedule reports: what was asked for, what was built, and how well pairs were spread.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rotation_kernel::{PairLedger, Participant, Round, Schedule};
use serde::{Deserialize, Serialize};

/// Parameters of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Normalized participant labels
    pub participants: Vec<Participant>,
    /// Seats per table, in table order
    pub group_sizes: Vec<usize>,
    /// Days asked for
    pub requested_rounds: usize,
    /// RNG seed, so the run can be reproduced
    pub seed: u64,
    /// Trial budget per day
    pub trials_per_round: usize,
}

/// How evenly the schedule spread people around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSummary {
    /// Distinct pairs that shared a table at least once
    pub distinct_pairs: usize,
    /// Pairs that shared a table more than once
    pub repeated_pairs: usize,
    /// Most times any single pair sat together
    pub max_pair_count: u32,
    /// Sum of day scores
    pub total_score: u64,
}

impl PairSummary {
    pub fn from_ledger(ledger: &PairLedger, total_score: u64) -> Self {
        Self {
            distinct_pairs: ledger.len(),
            repeated_pairs: ledger.repeated_pairs(),
            max_pair_count: ledger.max_count(),
            total_score,
        }
    }
}

/// Results from a single generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub config: RunConfig,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Days that were built, in order
    pub rounds: Vec<Round>,
    /// Whether every requested day was built
    pub complete: bool,
    pub summary: PairSummary,
}

impl ScheduleReport {
    pub fn new(
        config: RunConfig,
        schedule: &Schedule,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            started_at,
            ended_at,
            rounds: schedule.rounds.clone(),
            complete: schedule.is_complete(),
            summary: PairSummary::from_ledger(&schedule.ledger, schedule.total_score()),
        }
    }

    /// Rebuild the schedule view, replaying rounds to restore pair history.
    pub fn schedule(&self) -> Schedule {
        let mut ledger = PairLedger::new();
        for group in self.rounds.iter().flat_map(|r| &r.groups) {
            ledger.record_group(group);
        }
        Schedule {
            requested_rounds: self.config.requested_rounds,
            rounds: self.rounds.clone(),
            ledger,
        }
    }

    /// Wall-clock time spent generating, in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }

    /// Save the report to a JSON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let report = serde_json::from_str(&json)
            .with_context(|| format!("parsing report {}", path.display()))?;
        Ok(report)
    }
}

/// Format a duration in milliseconds for display.
pub fn format_duration(ms: i64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{:.1}m", ms as f64 / 60_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let rounds = vec![
            Round {
                groups: vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["c".to_string(), "d".to_string()],
                ],
                score: 0,
                trials: 1,
            },
            Round {
                groups: vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["c".to_string(), "d".to_string()],
                ],
                score: 2,
                trials: 40,
            },
        ];
        let mut ledger = PairLedger::new();
        for group in rounds.iter().flat_map(|r| &r.groups) {
            ledger.record_group(group);
        }
        Schedule {
            requested_rounds: 3,
            rounds,
            ledger,
        }
    }

    fn sample_config() -> RunConfig {
        RunConfig {
            participants: vec!["a", "b", "c", "d"].into_iter().map(String::from).collect(),
            group_sizes: vec![2, 2],
            requested_rounds: 3,
            seed: 42,
            trials_per_round: 700,
        }
    }

    #[test]
    fn test_summary_from_schedule() {
        let now = Utc::now();
        let report = ScheduleReport::new(sample_config(), &sample_schedule(), now, now);

        assert!(!report.complete);
        assert_eq!(report.summary.distinct_pairs, 2);
        assert_eq!(report.summary.repeated_pairs, 2);
        assert_eq!(report.summary.max_pair_count, 2);
        assert_eq!(report.summary.total_score, 2);
        assert_eq!(report.duration_ms(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let now = Utc::now();
        let report = ScheduleReport::new(sample_config(), &sample_schedule(), now, now);

        report.save(&path).unwrap();
        let loaded = ScheduleReport::load(&path).unwrap();

        assert_eq!(loaded.config, report.config);
        assert_eq!(loaded.rounds, report.rounds);
        assert_eq!(loaded.summary, report.summary);

        // Replaying rounds restores the pair history
        let schedule = loaded.schedule();
        assert_eq!(schedule.ledger.lookup("a", "b"), 2);
        assert_eq!(schedule.len(), 2);
        assert!(!schedule.is_complete());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(90_000), "1.5m");
    }
}
