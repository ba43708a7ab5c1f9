//! Snapshot age and staleness.

use std::path::Path;

use chrono::Utc;

use super::io::read_snapshot;

/// Milliseconds since the snapshot at `path` was taken.
///
/// `None` if the snapshot cannot be read.
pub fn snapshot_age_ms(path: &Path) -> Option<i64> {
    read_snapshot(path).map(|snapshot| snapshot.age_ms_at(Utc::now()))
}

/// Whether the snapshot at `path` is missing, corrupt, or older than
/// `threshold_ms` (usually `WatchdogConfig::stale_threshold_ms`, 5000 by
/// default).
pub fn is_snapshot_stale(path: &Path, threshold_ms: u64) -> bool {
    snapshot_age_ms(path).is_none_or(|age| exceeds_threshold(age, threshold_ms))
}

/// Whether an age in milliseconds is past the threshold.
pub(crate) fn exceeds_threshold(age_ms: i64, threshold_ms: u64) -> bool {
    i64::try_from(threshold_ms).is_ok_and(|threshold| age_ms > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::write_snapshot;
    use chrono::Duration;
    use killswitch_core::{OrchestratorStatus, StateSnapshot};
    use std::fs;
    use tempfile::tempdir;

    fn snapshot_aged(age: Duration) -> StateSnapshot {
        let mut snapshot = StateSnapshot::build(OrchestratorStatus::default(), vec![], vec![]);
        snapshot.timestamp = Utc::now() - age;
        snapshot
    }

    #[test]
    fn fresh_snapshot_is_not_stale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        write_snapshot(&snapshot_aged(Duration::zero()), &path).unwrap();

        let age = snapshot_age_ms(&path).expect("age");
        assert!((0..1000).contains(&age));
        assert!(!is_snapshot_stale(&path, 5000));
    }

    #[test]
    fn old_snapshot_is_stale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        write_snapshot(&snapshot_aged(Duration::seconds(10)), &path).unwrap();

        assert!(snapshot_age_ms(&path).unwrap() >= 10_000);
        assert!(is_snapshot_stale(&path, 5000));
        assert!(!is_snapshot_stale(&path, 60_000));
    }

    #[test]
    fn missing_or_corrupt_snapshot_is_stale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        assert_eq!(snapshot_age_ms(&path), None);
        assert!(is_snapshot_stale(&path, 5000));

        fs::write(&path, "{oops").unwrap();
        assert_eq!(snapshot_age_ms(&path), None);
        assert!(is_snapshot_stale(&path, 5000));
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!exceeds_threshold(5000, 5000));
        assert!(exceeds_threshold(5001, 5000));
        assert!(!exceeds_threshold(-20, 0));
    }
}
