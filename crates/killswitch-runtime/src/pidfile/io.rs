//! PID file I/O operations.
//!
//! Format: a single decimal PID, optionally surrounded by whitespace.
//! ```text
//! 12345
//! ```

use std::fs;
use std::io;
use std::path::Path;

use killswitch_core::ProcessId;
use tracing::{debug, warn};

/// Write `pid` to `path`, creating parent directories as needed.
pub fn write_pidfile(path: &Path, pid: ProcessId) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, pid.to_string())
}

/// Read the PID stored at `path`.
///
/// Returns `None` if the file is missing, unreadable, empty, or does not hold
/// a positive integer. Surrounding whitespace is ignored.
pub fn read_pidfile(path: &Path) -> Option<ProcessId> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No PID file at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Cannot read PID file {}: {}", path.display(), e);
            return None;
        }
    };

    match content.parse::<ProcessId>() {
        Ok(pid) => Some(pid),
        Err(e) => {
            warn!("Ignoring malformed PID file {}: {}", path.display(), e);
            None
        }
    }
}

/// Delete the PID file (idempotent - a missing file counts as removed).
///
/// Returns `false` only when the OS refuses the removal.
pub fn remove_pidfile(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed PID file {}", path.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Failed to remove PID file {}: {}", path.display(), e);
            false
        }
    }
}
