//! Async front door for schedule generation.
//!
//! Generation is plain synchronous CPU work. The service moves it onto
//! tokio's blocking pool so async callers stay responsive, and refuses a
//! second request while one is still running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rotation_kernel::{EngineConfig, Participant, ScheduleBuilder};
use tracing::{debug, info};

use crate::results::{RunConfig, ScheduleReport};

/// What to generate.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Normalized, unique participant labels
    pub participants: Vec<Participant>,
    /// Number of days to build
    pub rounds: usize,
    /// Seats per table
    pub group_sizes: Vec<usize>,
    /// Fixed seed for reproducible output; random when absent
    pub seed: Option<u64>,
}

/// Clears the busy flag when the job ends, including by panic.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one generation at a time on the blocking pool.
#[derive(Clone)]
pub struct GenerationService {
    builder: Arc<ScheduleBuilder>,
    busy: Arc<AtomicBool>,
}

impl GenerationService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            builder: Arc::new(ScheduleBuilder::new(config)),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a generation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Generate a schedule without blocking the async runtime.
    ///
    /// Fails immediately if another generation is still running.
    pub async fn generate(&self, request: GenerationRequest) -> Result<ScheduleReport> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            bail!("a schedule generation is already running");
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let builder = Arc::clone(&self.builder);
        let seed = request.seed.unwrap_or_else(rand::random);
        debug!(seed, "Dispatching generation to blocking pool");

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            run_generation(&builder, request, seed)
        })
        .await
        .context("schedule generation task failed")
    }
}

/// Generate a schedule synchronously and wrap it in a report.
pub fn run_generation(
    builder: &ScheduleBuilder,
    request: GenerationRequest,
    seed: u64,
) -> ScheduleReport {
    let started_at = Utc::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    info!(
        participants = request.participants.len(),
        rounds = request.rounds,
        group_sizes = ?request.group_sizes,
        seed,
        "Generating schedule"
    );

    let schedule = builder.generate(
        &request.participants,
        request.rounds,
        &request.group_sizes,
        &mut rng,
    );

    let config = RunConfig {
        participants: request.participants,
        group_sizes: request.group_sizes,
        requested_rounds: request.rounds,
        seed,
        trials_per_round: builder.config().trials.schedule_trials,
    };

    ScheduleReport::new(config, &schedule, started_at, Utc::now())
}
