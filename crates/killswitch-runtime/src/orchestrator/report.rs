//! Structured results returned by `KillSwitch`.

use std::path::PathBuf;

use killswitch_core::{KillMethod, KillResult, SnapshotSummary, StateSnapshot};
use serde::Serialize;

use crate::pidfile::PidFileStatus;

/// Outcome of `KillSwitch::kill`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KillReport {
    /// No parseable PID was found; nothing was signalled.
    NotFound { pid_file: PathBuf },

    /// A kill sequence ran (or the process was already gone).
    Completed {
        #[serde(flatten)]
        result: KillResult,
        /// Whether the PID file is gone after the kill. A failed kill leaves
        /// it in place for follow-up.
        pid_file_removed: bool,
        /// `None` when no readable snapshot existed.
        state_snapshot: Option<StateReport>,
    },
}

impl KillReport {
    /// Whether the tracked process is known to be gone.
    pub const fn is_success(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::Completed { result, .. } => result.success,
        }
    }

    pub const fn method(&self) -> Option<KillMethod> {
        match self {
            Self::NotFound { .. } => None,
            Self::Completed { result, .. } => Some(result.method),
        }
    }

    pub const fn result(&self) -> Option<&KillResult> {
        match self {
            Self::NotFound { .. } => None,
            Self::Completed { result, .. } => Some(result),
        }
    }

    pub const fn state_snapshot(&self) -> Option<&StateReport> {
        match self {
            Self::NotFound { .. } => None,
            Self::Completed { state_snapshot, .. } => state_snapshot.as_ref(),
        }
    }
}

/// What the watchdog found in the state snapshot after a kill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateReport {
    pub open_positions: usize,
    pub open_orders: usize,
    pub total_exposure: f64,
    pub age_ms: i64,
    /// The snapshot was older than the stale threshold at kill time.
    pub stale: bool,
    /// The snapshot was rewritten with `forced_kill: true`.
    pub forced_kill_marked: bool,
}

impl StateReport {
    pub(crate) const fn new(
        summary: SnapshotSummary,
        age_ms: i64,
        stale: bool,
        forced_kill_marked: bool,
    ) -> Self {
        Self {
            open_positions: summary.open_positions,
            open_orders: summary.open_orders,
            total_exposure: summary.total_exposure,
            age_ms,
            stale,
            forced_kill_marked,
        }
    }
}

/// Read-only view of the PID file and state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchdogStatus {
    pub pid_file: PathBuf,
    pub process: PidFileStatus,
    pub state_file: PathBuf,
    /// `None` when no readable snapshot exists.
    pub snapshot: Option<SnapshotStatus>,
    /// Missing, corrupt, or older than the stale threshold.
    pub snapshot_stale: bool,
}

impl WatchdogStatus {
    /// Whether the tracked process appears to be running.
    pub const fn is_running(&self) -> bool {
        self.process.exists && !self.process.is_stale
    }
}

/// Summary of a readable snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotStatus {
    pub age_ms: i64,
    pub forced_kill: bool,
    pub stale_warning: bool,
    pub summary: SnapshotSummary,
}

impl SnapshotStatus {
    pub(crate) const fn new(snapshot: &StateSnapshot, age_ms: i64) -> Self {
        Self {
            age_ms,
            forced_kill: snapshot.forced_kill,
            stale_warning: snapshot.stale_warning,
            summary: snapshot.summary,
        }
    }
}
