//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the runtime is wired together for
//! the CLI adapter: configuration is resolved from env and flags, default
//! paths are filled in, and the `KillSwitch` is built with the OS signaller.

use std::path::PathBuf;

use killswitch_core::{WatchdogConfig, default_pid_file, default_state_file};
use killswitch_runtime::KillSwitch;
use tracing::debug;

use crate::commands::FileArgs;
use crate::error::CliError;

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub watchdog: WatchdogConfig,
    pub pid_file: PathBuf,
    pub state_file: PathBuf,
}

impl CliConfig {
    /// Resolve configuration from `KILLSWITCH_*` env vars and flag overrides.
    pub fn resolve(files: &FileArgs, graceful_timeout_ms: Option<u64>) -> Result<Self, CliError> {
        Self::from_parts(WatchdogConfig::from_env()?, files, graceful_timeout_ms)
    }

    /// Apply flag overrides on top of an already loaded `WatchdogConfig`.
    pub fn from_parts(
        mut watchdog: WatchdogConfig,
        files: &FileArgs,
        graceful_timeout_ms: Option<u64>,
    ) -> Result<Self, CliError> {
        if let Some(timeout) = graceful_timeout_ms {
            watchdog = watchdog.with_graceful_timeout_ms(timeout);
        }
        watchdog.validate()?;

        let pid_file = match &files.pid_file {
            Some(path) => path.clone(),
            None => default_pid_file()?,
        };
        let state_file = match &files.state_file {
            Some(path) => path.clone(),
            None => default_state_file()?,
        };

        Ok(Self {
            watchdog,
            pid_file,
            state_file,
        })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub switch: KillSwitch,
    pub pid_file: PathBuf,
    pub state_file: PathBuf,
}

/// Build the CLI context from resolved configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    debug!(
        "Watchdog config: {:?}, pid file {}, state file {}",
        config.watchdog,
        config.pid_file.display(),
        config.state_file.display()
    );

    let switch = KillSwitch::with_default_signaller(config.watchdog)?;
    Ok(CliContext {
        switch,
        pid_file: config.pid_file,
        state_file: config.state_file,
    })
}
