//! Outcome of a single kill sequence.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::process::ProcessId;

/// How a kill sequence terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillMethod {
    /// The process was not running when the sequence started.
    AlreadyStopped,
    /// The process exited after SIGTERM, within the graceful timeout.
    Graceful,
    /// The process had to be SIGKILLed.
    Force,
    /// The process was still alive after SIGKILL and the settle wait.
    Failed,
}

impl KillMethod {
    /// Whether this terminal state counts as a successful kill.
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyStopped => "already_stopped",
            Self::Graceful => "graceful",
            Self::Force => "force",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for KillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one kill sequence. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillResult {
    pub pid: ProcessId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub graceful_sent: bool,
    pub force_sent: bool,
    pub method: KillMethod,
    pub success: bool,
}

impl KillResult {
    /// Result for a process that was not running when checked.
    pub fn already_stopped(pid: ProcessId, started_at: DateTime<Utc>, duration_ms: u64) -> Self {
        Self {
            pid,
            started_at,
            completed_at: Utc::now(),
            duration_ms,
            graceful_sent: false,
            force_sent: false,
            method: KillMethod::AlreadyStopped,
            success: true,
        }
    }
}
