//! Process identity and signal kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// OS process identifier of a tracked process.
///
/// Always strictly positive. The watchdog never creates or destroys the
/// identity, it only observes it, so there is no way to construct a
/// `ProcessId` for pid 0 or a negative pid (which `kill(2)` would treat as a
/// process group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProcessId(i32);

impl ProcessId {
    /// Create a `ProcessId` from an untyped integer.
    ///
    /// Returns `None` for `raw <= 0` or values outside the OS pid range.
    pub fn new(raw: i64) -> Option<Self> {
        if raw <= 0 {
            return None;
        }
        i32::try_from(raw).ok().map(Self)
    }

    /// Identity of the calling process.
    pub fn current() -> Self {
        // OS pids of a running process are always positive and fit in pid_t
        Self(i32::try_from(std::process::id()).unwrap_or(i32::MAX))
    }

    /// Raw value as passed to `kill(2)`.
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProcessId> for i64 {
    fn from(pid: ProcessId) -> Self {
        i64::from(pid.0)
    }
}

impl TryFrom<i64> for ProcessId {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("invalid process id: {raw}"))
    }
}

impl TryFrom<u32> for ProcessId {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(raw))
    }
}

impl FromStr for ProcessId {
    type Err = String;

    /// Parse a trimmed decimal pid. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid process id {s:?}: {e}"))?;
        Self::try_from(raw)
    }
}

/// Termination signals the watchdog can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillSignal {
    /// Interceptable termination request (SIGTERM).
    Graceful,
    /// Unconditional termination (SIGKILL).
    Force,
}

impl KillSignal {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Graceful => "SIGTERM",
            Self::Force => "SIGKILL",
        }
    }
}

impl fmt::Display for KillSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
