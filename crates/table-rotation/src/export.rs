//! CSV export of a schedule: one row per seat.

use std::path::Path;

use anyhow::{Context, Result};
use rotation_kernel::Round;

const HEADER: &str = "day,table,participant";

/// Serialize rounds as `day,table,participant` rows (days and tables 1-based).
pub fn to_csv(rounds: &[Round]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for (day, round) in rounds.iter().enumerate() {
        for (table, group) in round.groups.iter().enumerate() {
            for participant in group {
                out.push_str(&format!(
                    "{},{},{}\n",
                    day + 1,
                    table + 1,
                    escape_field(participant)
                ));
            }
        }
    }

    out
}

/// Write the CSV rendering of `rounds` to `path`.
pub fn write_csv(path: impl AsRef<Path>, rounds: &[Round]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_csv(rounds)).with_context(|| format!("writing {}", path.display()))
}

/// Quote a field if it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
