//! Problem input and solution records.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use hexfall_core::encode_commands;
use hexfall_engine::{Game, GameData};
use serde::{Deserialize, Serialize};

/// One solution as submitted: which game it plays and the command string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub problem_id: i64,
    pub seed: u32,
    #[serde(default)]
    pub tag: String,
    pub solution: String,
    #[serde(rename = "_score", default)]
    pub score: i64,
}

/// Load a problem from `path`, or from stdin when there is none.
pub fn read_problem(path: Option<&Path>) -> anyhow::Result<GameData> {
    let json = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read problem {}", path.display()))?,
        None => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("failed to read problem from stdin")?;
            json
        }
    };
    let data = GameData::from_json(&json).context("invalid problem")?;
    Ok(data)
}

/// Load a JSON array of solution records.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<OutputRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read solutions {}", path.display()))?;
    let records = serde_json::from_str(&json)
        .with_context(|| format!("invalid solutions in {}", path.display()))?;
    Ok(records)
}

/// Write `record` as a one-element JSON array on its own line.
pub fn write_record<W: Write>(mut writer: W, record: &OutputRecord) -> anyhow::Result<()> {
    serde_json::to_writer(&mut writer, std::slice::from_ref(record))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `game` followed by one line per placement its falling unit can
/// lock in: the placement, then the commands that get it there.
pub fn write_placements<W: Write>(mut writer: W, game: &Game<'_>) -> anyhow::Result<()> {
    writeln!(writer, "{game}")?;
    for result in game.reachable_placements() {
        writeln!(writer, "{} {}", result.location, encode_commands(&result.commands))?;
    }
    writer.flush()?;
    Ok(())
}
