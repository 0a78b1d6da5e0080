//! Table Rotation CLI.
//!
//! Generate multi-day table rotations from a list of names, and page
//! through saved results.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rotation_kernel::EngineConfig;
use table_rotation::export::write_csv;
use table_rotation::render::{render_round, RoundPager, EMPTY_SCHEDULE_MESSAGE};
use table_rotation::results::format_duration;
use table_rotation::roster::{DEFAULT_GROUP_COUNT, MIN_PARTICIPANTS};
use table_rotation::{
    group_sizes, shortfall_message, GenerationRequest, GenerationService, Roster,
    RosterGenerator, RosterGeneratorConfig, ScheduleReport,
};

#[derive(Parser)]
#[command(name = "table-rotation")]
#[command(about = "Rotate people across tables over several days, minimizing repeat pairings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (JSON)
    #[arg(long, global = true, env = "TABLE_ROTATION_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a rotation from a list of names (one per line).
    Generate {
        /// Names file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Number of days
        #[arg(short, long, default_value = "6")]
        days: usize,
        /// Number of tables per day
        #[arg(short, long, default_value_t = DEFAULT_GROUP_COUNT)]
        groups: usize,
        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output file for the seating list (CSV)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Generate a rotation for a synthetic roster.
    Demo {
        /// Number of participants
        #[arg(short, long, default_value = "25")]
        participants: usize,
        /// Number of days
        #[arg(short, long, default_value = "6")]
        days: usize,
        /// Number of tables per day
        #[arg(short, long, default_value_t = DEFAULT_GROUP_COUNT)]
        groups: usize,
        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show a day from a saved report.
    Show {
        /// Report file (JSON)
        report: PathBuf,
        /// Day to show (1-based); shows every day when omitted
        #[arg(short, long)]
        day: Option<usize>,
    },
}

fn load_engine_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

async fn generate(
    service: &GenerationService,
    roster: Roster,
    days: usize,
    groups: usize,
    seed: Option<u64>,
) -> Result<ScheduleReport> {
    roster.validate(MIN_PARTICIPANTS, groups)?;
    let sizes = group_sizes(roster.len(), groups);

    let report = service
        .generate(GenerationRequest {
            participants: roster.participants().to_vec(),
            rounds: days,
            group_sizes: sizes,
            seed,
        })
        .await?;

    print_report(&report);
    Ok(report)
}

fn print_report(report: &ScheduleReport) {
    for (index, round) in report.rounds.iter().enumerate() {
        println!("{}", render_round(round, index));
    }

    println!("=== Rotation Complete ===");
    println!("Participants: {}", report.config.participants.len());
    println!("Tables: {:?}", report.config.group_sizes);
    println!("Days: {}/{}", report.rounds.len(), report.config.requested_rounds);
    println!("Seed: {}", report.config.seed);
    println!("Total score: {}", report.summary.total_score);
    println!(
        "Pairs seated: {} ({} repeated, max {} times)",
        report.summary.distinct_pairs, report.summary.repeated_pairs, report.summary.max_pair_count
    );
    println!("Time: {}", format_duration(report.duration_ms()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let engine_config = load_engine_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Generate {
            input,
            days,
            groups,
            seed,
            output,
            csv,
        } => {
            let roster = match input {
                Some(path) => Roster::load(&path)?,
                None => Roster::from_reader(std::io::stdin().lock())?,
            };
            info!(participants = roster.len(), days, groups, "Loaded roster");

            let service = GenerationService::new(engine_config);
            let report = generate(&service, roster, days, groups, seed).await?;

            let schedule = report.schedule();
            if let Some(message) = shortfall_message(&schedule) {
                warn!(built = schedule.len(), requested = days, "Schedule is short");
                eprintln!("{}", message);
            }
            if schedule.is_empty() && days > 0 {
                bail!(EMPTY_SCHEDULE_MESSAGE);
            }

            if let Some(output) = output {
                report.save(&output)?;
                println!("\nReport written to: {}", output.display());
            }
            if let Some(csv) = csv {
                write_csv(&csv, &report.rounds)?;
                println!("Seating list written to: {}", csv.display());
            }
        }

        Commands::Demo {
            participants,
            days,
            groups,
            seed,
        } => {
            let generator_config = RosterGeneratorConfig {
                participants,
                ..RosterGeneratorConfig::classroom()
            };
            let roster = RosterGenerator::new(generator_config, seed).generate();

            let service = GenerationService::new(engine_config);
            let report = generate(&service, roster, days, groups, Some(seed)).await?;

            if let Some(message) = shortfall_message(&report.schedule()) {
                eprintln!("{}", message);
            }
        }

        Commands::Show { report, day } => {
            let report = ScheduleReport::load(&report)
                .with_context(|| format!("loading report {}", report.display()))?;
            if report.rounds.is_empty() {
                bail!(EMPTY_SCHEDULE_MESSAGE);
            }

            match day {
                Some(day) => {
                    if day == 0 || day > report.rounds.len() {
                        bail!("day must be between 1 and {}", report.rounds.len());
                    }
                    let pager = RoundPager::at(&report.rounds, day - 1);
                    if let Some(text) = pager.render() {
                        println!("{}", text);
                    }
                }
                None => print_report(&report),
            }
        }
    }

    Ok(())
}
