//! Staleness detection for PID files left behind by crashed processes.

use std::path::Path;

use killswitch_core::{ProcessId, ProcessSignaller};
use serde::Serialize;
use tracing::debug;

use super::io::read_pidfile;

/// Whether a PID file exists and still points at a running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PidFileStatus {
    /// A parseable PID was found.
    pub exists: bool,
    /// The recorded PID no longer refers to a running process.
    pub is_stale: bool,
    pub pid: Option<ProcessId>,
}

/// Check whether the PID file at `path` is stale.
///
/// A missing or malformed file is reported as not existing and not stale.
pub fn check_stale(path: &Path, signaller: &dyn ProcessSignaller) -> PidFileStatus {
    let Some(pid) = read_pidfile(path) else {
        return PidFileStatus {
            exists: false,
            is_stale: false,
            pid: None,
        };
    };

    let is_stale = !signaller.exists(pid);
    if is_stale {
        debug!("PID file {} points at dead PID {}", path.display(), pid);
    }

    PidFileStatus {
        exists: true,
        is_stale,
        pid: Some(pid),
    }
}
