//! Table Rotation - seat a roster at tables for several days with few repeat pairings.
//!
//! Wraps the rotation kernel with everything around it: reading and
//! normalizing names, deriving table sizes, rendering and paging days,
//! JSON reports, CSV export, and an async generation service.
//!
//! ## Workflow
//!
//! 1. Read names (one per line) into a [`Roster`]; repeats become `Name (2)`
//! 2. Split the roster across tables with [`group_sizes`]
//! 3. Generate through [`GenerationService`] or the kernel directly
//! 4. Render, page, save or export the resulting days

pub mod export;
pub mod generator;
pub mod render;
pub mod results;
pub mod roster;
pub mod service;

pub use generator::{RosterGenerator, RosterGeneratorConfig};
pub use render::{render_round, render_schedule, shortfall_message, RoundPager};
pub use results::{PairSummary, RunConfig, ScheduleReport};
pub use roster::{group_sizes, normalize_names, Roster};
pub use service::{run_generation, GenerationRequest, GenerationService};
