//! Text rendering of rounds and day-by-day paging.

use rotation_kernel::{Round, Schedule};

/// Shown when not a single day could be built.
pub const EMPTY_SCHEDULE_MESSAGE: &str =
    "Could not build a rotation with these parameters. Try fewer days.";

/// Render one day as text.
///
/// ```text
/// Day 1
/// Score: 0
///   Table 1: Ana, Bruno, Carla
///   Table 2: Diego, Elisa, Felipe
/// ```
pub fn render_round(round: &Round, index: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Day {}\n", index + 1));
    out.push_str(&format!("Score: {}\n", round.score));
    for (table, group) in round.groups.iter().enumerate() {
        out.push_str(&format!("  Table {}: {}\n", table + 1, group.join(", ")));
    }
    out
}

/// Render every day of a schedule, separated by blank lines.
pub fn render_schedule(schedule: &Schedule) -> String {
    schedule
        .rounds
        .iter()
        .enumerate()
        .map(|(i, round)| render_round(round, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User-facing note when the schedule is empty or short, `None` otherwise.
pub fn shortfall_message(schedule: &Schedule) -> Option<String> {
    if schedule.is_empty() && schedule.requested_rounds > 0 {
        Some(EMPTY_SCHEDULE_MESSAGE.to_string())
    } else if !schedule.is_complete() {
        Some(format!(
            "Only {} of {} days could be built.",
            schedule.len(),
            schedule.requested_rounds
        ))
    } else {
        None
    }
}

/// Steps back and forth through the days of a schedule.
#[derive(Debug, Clone)]
pub struct RoundPager<'a> {
    rounds: &'a [Round],
    index: usize,
}

impl<'a> RoundPager<'a> {
    pub fn new(rounds: &'a [Round]) -> Self {
        Self { rounds, index: 0 }
    }

    /// Start at `index`, clamped to the last day.
    pub fn at(rounds: &'a [Round], index: usize) -> Self {
        let mut pager = Self::new(rounds);
        pager.index = index.min(rounds.len().saturating_sub(1));
        pager
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a Round> {
        self.rounds.get(self.index)
    }

    /// Advance one day, staying on the last day at the end.
    pub fn next_day(&mut self) -> Option<&'a Round> {
        if self.index + 1 < self.rounds.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Go back one day, staying on the first day at the start.
    pub fn prev_day(&mut self) -> Option<&'a Round> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    pub fn render(&self) -> Option<String> {
        self.current().map(|round| render_round(round, self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_kernel::PairLedger;

    fn round(score: u64, groups: &[&[&str]]) -> Round {
        Round {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|n| n.to_string()).collect())
                .collect(),
            score,
            trials: 1,
        }
    }

    fn schedule(requested: usize, rounds: Vec<Round>) -> Schedule {
        Schedule {
            requested_rounds: requested,
            rounds,
            ledger: PairLedger::new(),
        }
    }

    #[test]
    fn test_render_round() {
        let text = render_round(&round(3, &[&["Ana", "Bruno"], &["Carla", "Diego"]]), 1);
        assert_eq!(
            text,
            "Day 2\nScore: 3\n  Table 1: Ana, Bruno\n  Table 2: Carla, Diego\n"
        );
    }

    #[test]
    fn test_pager_clamps() {
        let rounds = vec![round(0, &[&["a"]]), round(1, &[&["b"]]), round(2, &[&["c"]])];
        let mut pager = RoundPager::new(&rounds);

        assert_eq!(pager.prev_day().unwrap().score, 0);
        assert_eq!(pager.next_day().unwrap().score, 1);
        assert_eq!(pager.next_day().unwrap().score, 2);
        assert_eq!(pager.next_day().unwrap().score, 2);
        assert_eq!(pager.index(), 2);
        assert!(pager.render().unwrap().starts_with("Day 3"));

        let pager = RoundPager::at(&rounds, 10);
        assert_eq!(pager.index(), 2);
    }

    #[test]
    fn test_pager_empty() {
        let mut pager = RoundPager::new(&[]);
        assert!(pager.current().is_none());
        assert!(pager.next_day().is_none());
        assert!(pager.prev_day().is_none());
        assert!(pager.render().is_none());
    }

    #[test]
    fn test_shortfall_message() {
        assert_eq!(
            shortfall_message(&schedule(3, Vec::new())).as_deref(),
            Some(EMPTY_SCHEDULE_MESSAGE)
        );
        assert_eq!(
            shortfall_message(&schedule(3, vec![round(0, &[&["a"]])])).unwrap(),
            "Only 1 of 3 days could be built."
        );
        assert!(shortfall_message(&schedule(1, vec![round(0, &[&["a"]])])).is_none());
        assert!(shortfall_message(&schedule(0, Vec::new())).is_none());
    }
}
