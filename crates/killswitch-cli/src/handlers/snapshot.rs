//! Snapshot command handler.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use killswitch_runtime::read_snapshot;

use crate::error::{EXIT_NO_INPUT, EXIT_OK};
use crate::presentation::{format_snapshot_line, to_json};

/// Print the stored snapshot.
///
/// `--json` prints the full document; text mode prints the summary line.
/// Exits 66 when no readable snapshot exists.
pub fn execute(state_file: &Path, json: bool) -> Result<u8> {
    let Some(snapshot) = read_snapshot(state_file) else {
        eprintln!("No readable state snapshot at {}", state_file.display());
        return Ok(EXIT_NO_INPUT);
    };

    if json {
        println!("{}", to_json(&snapshot)?);
    } else {
        let producer = snapshot
            .pid
            .map_or_else(|| "unknown".to_string(), |pid| pid.to_string());
        println!(
            "Snapshot from process {} at {}",
            producer,
            snapshot.timestamp.to_rfc3339()
        );
        print!(
            "{}",
            format_snapshot_line(
                snapshot.summary.open_positions,
                snapshot.summary.open_orders,
                snapshot.summary.total_exposure,
                snapshot.age_ms_at(Utc::now()),
            )
        );
        println!("Orchestrator: {}", snapshot.orchestrator.state);
        if snapshot.forced_kill {
            println!("Written after a forced kill");
        }
    }

    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use killswitch_core::{OrchestratorStatus, Position, StateSnapshot};
    use killswitch_runtime::write_snapshot;

    #[test]
    fn missing_snapshot_exits_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        assert_eq!(execute(&path, false).unwrap(), EXIT_NO_INPUT);
    }

    #[test]
    fn readable_snapshot_exits_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let snapshot = StateSnapshot::build(
            OrchestratorStatus::default(),
            vec![Position::new("BTC-USD", "long", 0.5, 30.0)],
            Vec::new(),
        );
        write_snapshot(&snapshot, &path).unwrap();

        assert_eq!(execute(&path, true).unwrap(), EXIT_OK);
        assert_eq!(execute(&path, false).unwrap(), EXIT_OK);
    }
}
