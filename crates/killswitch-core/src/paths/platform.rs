//! Platform-specific data directory resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

const DATA_DIR_ENV: &str = "KILLSWITCH_DATA_DIR";

/// Get the directory holding the PID and state files.
///
/// Resolution order:
/// 1. `KILLSWITCH_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/killswitch`)
///
/// The directory is not created here; writers create parents on demand and
/// readers treat a missing directory like a missing file.
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if path.trim().is_empty() {
            return Err(PathError::EmptyOverride(DATA_DIR_ENV));
        }
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("killswitch"))
}
