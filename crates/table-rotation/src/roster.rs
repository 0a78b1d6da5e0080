//! Roster loading and group-size derivation.
//!
//! Raw input is one name per line. Names are trimmed, blank lines dropped,
//! and repeated names disambiguated with an occurrence suffix so the engine
//! always sees unique labels.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rotation_kernel::Participant;

/// Default number of tables per day.
pub const DEFAULT_GROUP_COUNT: usize = 5;

/// Smallest roster accepted for scheduling.
pub const MIN_PARTICIPANTS: usize = 5;

/// Trim, drop blanks and suffix repeats: `Ana`, `Ana (2)`, `Ana (3)`.
///
/// A suffix already taken by a literal input line is skipped, so
/// `Ana`, `Ana (2)`, `Ana` yields `Ana`, `Ana (2)`, `Ana (3)`.
pub fn normalize_names<I, S>(lines: I) -> Vec<Participant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<Participant> = HashSet::new();
    let mut names = Vec::new();

    for line in lines {
        let name = line.as_ref().trim();
        if name.is_empty() {
            continue;
        }

        let count = seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        let mut label = if *count > 1 {
            format!("{} ({})", name, count)
        } else {
            name.to_string()
        };
        while taken.contains(&label) {
            *count += 1;
            label = format!("{} ({})", name, count);
        }

        taken.insert(label.clone());
        names.push(label);
    }

    names
}

/// Split `total` seats into `group_count` tables whose sizes differ by at most one.
///
/// The first `total % group_count` tables take the extra seat. A group count
/// of zero yields no tables.
pub fn group_sizes(total: usize, group_count: usize) -> Vec<usize> {
    if group_count == 0 {
        return Vec::new();
    }
    let base = total / group_count;
    let remainder = total % group_count;
    (0..group_count)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

/// A normalized list of unique participant labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster from newline-separated text.
    pub fn from_text(text: &str) -> Self {
        Self {
            participants: normalize_names(text.lines()),
        }
    }

    /// Read a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading roster {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// Read a roster from any reader, e.g. stdin.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("reading roster input")?;
        Ok(Self::from_text(&text))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Reject rosters the engine cannot seat: too small, or with a label
    /// appearing twice.
    pub fn validate(&self, min_participants: usize, group_count: usize) -> Result<()> {
        let mut labels = HashSet::new();
        if let Some(duplicate) = self.participants.iter().find(|p| !labels.insert(p.as_str())) {
            bail!("participant {:?} appears more than once", duplicate);
        }
        if group_count == 0 {
            bail!("at least one group is required");
        }
        if self.len() < min_participants {
            bail!(
                "need at least {} participants, got {}",
                min_participants,
                self.len()
            );
        }
        if self.len() < group_count {
            bail!(
                "{} participants cannot fill {} groups",
                self.len(),
                group_count
            );
        }
        Ok(())
    }
}

impl From<Vec<Participant>> for Roster {
    fn from(participants: Vec<Participant>) -> Self {
        Self { participants }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blanks() {
        let names = normalize_names(["  Ana ", "", "   ", "Bruno"]);
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[test]
    fn test_normalize_suffixes_repeats() {
        let names = normalize_names(["Ana", "Bruno", "Ana", " Ana", "Bruno"]);
        assert_eq!(names, vec!["Ana", "Bruno", "Ana (2)", "Ana (3)", "Bruno (2)"]);
    }

    #[test]
    fn test_normalize_skips_taken_suffixes() {
        let names = normalize_names(["Ana", "Ana (2)", "Ana", "Ana"]);
        assert_eq!(names, vec!["Ana", "Ana (2)", "Ana (3)", "Ana (4)"]);

        let names = normalize_names(["Ana", "Ana", "Ana (2)"]);
        assert_eq!(names, vec!["Ana", "Ana (2)", "Ana (2) (2)"]);
    }

    #[test]
    fn test_group_sizes_even_split() {
        assert_eq!(group_sizes(25, 5), vec![5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_group_sizes_remainder_goes_first() {
        assert_eq!(group_sizes(23, 5), vec![5, 5, 5, 4, 4]);
        assert_eq!(group_sizes(7, 5), vec![2, 2, 1, 1, 1]);
        assert_eq!(group_sizes(23, 5).iter().sum::<usize>(), 23);
    }

    #[test]
    fn test_group_sizes_zero_groups() {
        assert!(group_sizes(10, 0).is_empty());
    }

    #[test]
    fn test_roster_from_text() {
        let roster = Roster::from_text("Ana\n\nBruno\r\nAna\n");
        assert_eq!(roster.participants(), ["Ana", "Bruno", "Ana (2)"]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_from_reader() {
        let roster = Roster::from_reader("Ana\nBruno\n".as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_validate() {
        let roster = Roster::from_text("a\nb\nc\nd");
        assert!(roster.validate(MIN_PARTICIPANTS, DEFAULT_GROUP_COUNT).is_err());

        let roster = Roster::from_text("a\nb\nc\nd\ne");
        assert!(roster.validate(MIN_PARTICIPANTS, DEFAULT_GROUP_COUNT).is_ok());
        assert!(roster.validate(MIN_PARTICIPANTS, 6).is_err());
        assert!(roster.validate(MIN_PARTICIPANTS, 0).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_labels() {
        let roster = Roster::from(
            ["Ana", "Bruno", "Ana", "Carla", "Diego"]
                .map(String::from)
                .to_vec(),
        );
        let err = roster
            .validate(MIN_PARTICIPANTS, DEFAULT_GROUP_COUNT)
            .unwrap_err();
        assert!(err.to_string().contains("Ana"));
    }
}
