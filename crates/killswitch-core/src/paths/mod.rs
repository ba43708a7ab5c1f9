//! Default locations for the files shared with the tracked process.
//!
//! - `data_root()` - directory holding the PID file and the state file
//! - `default_pid_file()` / `default_state_file()` - canonical file paths
//!
//! Callers can always pass explicit paths instead; these are only the
//! defaults the CLI falls back to.

mod error;
mod platform;

use std::path::PathBuf;

pub use error::PathError;
pub use platform::data_root;

/// File name of the tracked process's PID file.
pub const PID_FILE_NAME: &str = "trader.pid";

/// File name of the persisted state snapshot.
pub const STATE_FILE_NAME: &str = "state.json";

/// Returns the default PID file location: `<data_root>/trader.pid`.
pub fn default_pid_file() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(PID_FILE_NAME))
}

/// Returns the default state snapshot location: `<data_root>/state.json`.
pub fn default_state_file() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(STATE_FILE_NAME))
}
