//! CLI-specific error types and exit-code mappings.

use killswitch_core::{ConfigError, KillMethod, PathError};
use killswitch_runtime::KillReport;
use thiserror::Error;

/// Kill finished and the process is gone.
pub const EXIT_OK: u8 = 0;
/// The process survived the kill sequence.
pub const EXIT_KILL_FAILED: u8 = 1;
/// Status: the tracked process is not running (LSB convention).
pub const EXIT_NOT_RUNNING: u8 = 3;
/// No PID file / snapshot to act on (EX_NOINPUT).
pub const EXIT_NO_INPUT: u8 = 66;
/// IO error (EX_IOERR).
pub const EXIT_IO: u8 = 74;
/// Invalid configuration (EX_CONFIG).
pub const EXIT_CONFIG: u8 = 78;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid watchdog configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Default file locations could not be resolved.
    #[error("Path error: {0}")]
    Paths(#[from] PathError),

    /// Terminal or serialization output failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Paths(_) => EXIT_CONFIG,
            Self::Output(_) => EXIT_IO,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

/// Exit code for a kill report.
///
/// `already_stopped`, `graceful` and `force` all mean the process is gone.
pub const fn kill_exit_code(report: &KillReport) -> u8 {
    match report.result() {
        None => EXIT_NO_INPUT,
        Some(result) => match result.method {
            KillMethod::AlreadyStopped | KillMethod::Graceful | KillMethod::Force => EXIT_OK,
            KillMethod::Failed => EXIT_KILL_FAILED,
        },
    }
}
