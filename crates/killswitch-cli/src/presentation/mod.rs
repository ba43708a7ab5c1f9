//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: results arrive fully computed from the
//! runtime and are only rendered here.

mod text;

pub use text::{format_kill_report, format_snapshot_line, format_status};

use serde::Serialize;

use crate::error::CliError;

/// Render any result as pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
