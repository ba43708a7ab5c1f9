//! Atomic snapshot I/O.
//!
//! # Atomicity
//! 1. Serialize to pretty JSON (2-space indent)
//! 2. Write and fsync `<path>.tmp`
//! 3. Rename to `<path>` (atomic on the same filesystem)

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use killswitch_core::{SNAPSHOT_VERSION, StateSnapshot};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::SnapshotError;

/// Atomically persist `snapshot` to `path`.
///
/// On failure the temp file is removed (best effort) and the error returned;
/// the previous contents of `path`, if any, are left intact.
pub fn write_snapshot(snapshot: &StateSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let temp_path = temp_path_for(path);

    if let Err(source) = write_then_rename(&json, &temp_path, path) {
        if let Err(e) = fs::remove_file(&temp_path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!("Failed to clean up {}: {}", temp_path.display(), e);
        }
        return Err(SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(
        "Wrote state snapshot {} ({} positions, {} orders)",
        path.display(),
        snapshot.summary.open_positions,
        snapshot.summary.open_orders
    );
    Ok(())
}

/// Read the snapshot stored at `path`.
///
/// Returns `None` for a missing path, empty content, invalid JSON, a missing
/// `timestamp`, or content that does not have the snapshot shape. A version
/// other than the current one is logged and the snapshot is still returned.
pub fn read_snapshot(path: &Path) -> Option<StateSnapshot> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No state snapshot at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Cannot read state snapshot {}: {}", path.display(), e);
            return None;
        }
    };

    if content.trim().is_empty() {
        warn!("State snapshot {} is empty", path.display());
        return None;
    }

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!("State snapshot {} is not valid JSON: {}", path.display(), e);
            return None;
        }
    };

    if value.get("timestamp").is_none_or(Value::is_null) {
        warn!("State snapshot {} has no timestamp", path.display());
        return None;
    }

    if let Some(version) = value.get("version").and_then(Value::as_u64)
        && version != u64::from(SNAPSHOT_VERSION)
    {
        warn!(
            "State snapshot {} has version {}, expected {}; reading it anyway",
            path.display(),
            version,
            SNAPSHOT_VERSION
        );
    }

    match serde_json::from_value(value) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("State snapshot {} has an unexpected shape: {}", path.display(), e);
            None
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_then_rename(json: &str, temp_path: &Path, final_path: &Path) -> io::Result<()> {
    if let Some(parent) = final_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(temp_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use killswitch_core::{OrchestratorStatus, Order, Position};
    use tempfile::tempdir;

    fn sample_snapshot() -> StateSnapshot {
        let mut position = Position::new("BTC-YES", "long", 10.0, 0.5);
        position
            .extra
            .insert("token_id".to_string(), Value::from("0xabc"));

        StateSnapshot::build(
            OrchestratorStatus {
                state: "running".to_string(),
                started_at: Some(Utc::now()),
                error_count: 1,
            },
            vec![position, Position::new("ETH-NO", "short", 20.0, 0.6)],
            vec![Order {
                id: "o-1".to_string(),
                market: "BTC-YES".to_string(),
                side: "sell".to_string(),
                price: 0.55,
                size: 10.0,
                status: "open".to_string(),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn roundtrip_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let snapshot = sample_snapshot();

        write_snapshot(&snapshot, &path).expect("write failed");

        assert_eq!(read_snapshot(&path), Some(snapshot));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn writes_two_space_pretty_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        write_snapshot(&sample_snapshot(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"version\": 1,"));
        assert!(content.contains("\n  \"summary\": {\n    \"open_positions\": 2,"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("state.json");

        write_snapshot(&sample_snapshot(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the final rename fail
        let path = dir.path().join("state.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupant"), "x").unwrap();

        let err = write_snapshot(&sample_snapshot(), &path).unwrap_err();

        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn overwrite_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let first = sample_snapshot();
        let second = first.with_forced_kill(false);

        write_snapshot(&first, &path).unwrap();
        write_snapshot(&second, &path).unwrap();

        assert_eq!(read_snapshot(&path), Some(second));
    }

    #[test]
    fn read_missing_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(read_snapshot(&dir.path().join("absent.json")), None);
    }

    #[test]
    fn read_invalid_content_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        for content in ["", "  \n", "{not json", "[]", r#"{"version": 1}"#, r#"{"timestamp": null}"#] {
            fs::write(&path, content).unwrap();
            assert_eq!(read_snapshot(&path), None, "content {content:?}");
        }
    }

    #[test]
    fn read_partial_document_with_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"version":1,"timestamp":"2026-01-01T00:00:00Z","pid":42,"positions":[],"orders":[]}"#,
        )
        .unwrap();

        let snapshot = read_snapshot(&path).expect("partial snapshot should be read");
        assert!(!snapshot.forced_kill);
        assert!(!snapshot.stale_warning);
        assert_eq!(snapshot.summary.open_positions, 0);
        assert_eq!(snapshot.orchestrator, OrchestratorStatus::default());
    }

    #[test]
    fn read_wrong_shape_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"timestamp": "2026-01-01T00:00:00Z", "positions": 3}"#).unwrap();

        assert_eq!(read_snapshot(&path), None);
    }

    #[test]
    fn read_tolerates_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut value = serde_json::to_value(sample_snapshot()).unwrap();
        value["version"] = Value::from(2);
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

        let snapshot = read_snapshot(&path).expect("mismatched version should still be read");
        assert_eq!(snapshot.version, 2);
    }
}
