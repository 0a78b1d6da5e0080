//! Synthetic roster generator.
//!
//! Generates seeded rosters of fake names for demos and tests, optionally
//! repeating some names so normalization has something to do.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::roster::{normalize_names, Roster};

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Hugo", "Isabel", "João",
    "Karina", "Lucas", "Marina", "Nuno", "Olívia", "Pedro", "Queila", "Rafael", "Sofia", "Tiago",
    "Úrsula", "Vítor", "Wanda", "Xavier", "Yara", "Zeca",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barros", "Costa", "Dias", "Esteves", "Freitas", "Gomes", "Lima", "Moura",
    "Nunes", "Oliveira", "Pereira", "Rocha", "Santos", "Teixeira", "Vieira",
];

/// Configuration for generating rosters.
#[derive(Debug, Clone)]
pub struct RosterGeneratorConfig {
    /// Number of raw entries to produce (before normalization).
    pub participants: usize,
    /// Fraction of entries that repeat an earlier name (0.0 to 1.0).
    pub duplicate_fraction: f64,
}

impl Default for RosterGeneratorConfig {
    fn default() -> Self {
        Self::classroom()
    }
}

impl RosterGeneratorConfig {
    /// A dozen people, no repeats.
    pub fn small() -> Self {
        Self {
            participants: 12,
            duplicate_fraction: 0.0,
        }
    }

    /// The reference classroom: 25 people, five tables of five.
    pub fn classroom() -> Self {
        Self {
            participants: 25,
            duplicate_fraction: 0.0,
        }
    }

    /// A larger event with a few repeated names.
    pub fn large() -> Self {
        Self {
            participants: 60,
            duplicate_fraction: 0.05,
        }
    }
}

/// Generator for rosters.
pub struct RosterGenerator {
    config: RosterGeneratorConfig,
    rng: ChaCha8Rng,
}

impl RosterGenerator {
    /// Create a new generator with the given config and seed.
    pub fn new(config: RosterGeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Raw name lines, possibly with repeats.
    pub fn generate_lines(&mut self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::with_capacity(self.config.participants);

        while lines.len() < self.config.participants {
            let repeat = !lines.is_empty() && self.rng.random_bool(self.duplicate_probability());
            if repeat {
                let earlier = lines[self.rng.random_range(0..lines.len())].clone();
                lines.push(earlier);
                continue;
            }

            let first = FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())];
            let mut name = format!("{} {}", first, last);
            // Accidental collisions would inflate the duplicate rate
            if lines.contains(&name) {
                name = format!("{} {}", name, lines.len() + 1);
            }
            lines.push(name);
        }

        lines
    }

    /// A normalized roster.
    pub fn generate(&mut self) -> Roster {
        Roster::from(normalize_names(self.generate_lines()))
    }

    fn duplicate_probability(&self) -> f64 {
        self.config.duplicate_fraction.clamp(0.0, 1.0)
    }
}
