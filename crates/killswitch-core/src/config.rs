//! Watchdog configuration.
//!
//! Every recognized field and its default is enumerated here. The
//! composition root builds one `WatchdogConfig` and hands it to the runtime;
//! nothing reads configuration from process-wide state after that.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long the tracked process gets to exit after SIGTERM.
pub const DEFAULT_GRACEFUL_TIMEOUT_MS: u64 = 2000;

/// Interval between liveness probes while waiting for a graceful exit.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Wait after SIGKILL before the final liveness check.
pub const DEFAULT_SETTLE_TIME_MS: u64 = 100;

/// Age after which a state snapshot is considered stale.
pub const DEFAULT_STALE_THRESHOLD_MS: u64 = 5000;

/// External deadline the whole kill sequence must fit under.
pub const DEFAULT_KILL_DEADLINE_MS: u64 = 5000;

const ENV_GRACEFUL_TIMEOUT_MS: &str = "KILLSWITCH_GRACEFUL_TIMEOUT_MS";
const ENV_POLL_INTERVAL_MS: &str = "KILLSWITCH_POLL_INTERVAL_MS";
const ENV_SETTLE_TIME_MS: &str = "KILLSWITCH_SETTLE_TIME_MS";
const ENV_STALE_THRESHOLD_MS: &str = "KILLSWITCH_STALE_THRESHOLD_MS";
const ENV_KILL_DEADLINE_MS: &str = "KILLSWITCH_KILL_DEADLINE_MS";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error(
        "Worst-case kill duration {worst_case_ms}ms (graceful + settle + poll) must stay under the {deadline_ms}ms deadline"
    )]
    ExceedsDeadline { worst_case_ms: u64, deadline_ms: u64 },

    #[error("Invalid value for {key}: {value:?} is not a non-negative integer")]
    InvalidValue { key: &'static str, value: String },
}

/// Timing configuration for the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    pub graceful_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub settle_time_ms: u64,
    pub stale_threshold_ms: u64,
    pub kill_deadline_ms: u64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            graceful_timeout_ms: DEFAULT_GRACEFUL_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_time_ms: DEFAULT_SETTLE_TIME_MS,
            stale_threshold_ms: DEFAULT_STALE_THRESHOLD_MS,
            kill_deadline_ms: DEFAULT_KILL_DEADLINE_MS,
        }
    }
}

impl WatchdogConfig {
    /// Defaults overlaid with `KILLSWITCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Unset keys keep their default; set but unparseable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let fields: [(&'static str, &mut u64); 5] = [
            (ENV_GRACEFUL_TIMEOUT_MS, &mut config.graceful_timeout_ms),
            (ENV_POLL_INTERVAL_MS, &mut config.poll_interval_ms),
            (ENV_SETTLE_TIME_MS, &mut config.settle_time_ms),
            (ENV_STALE_THRESHOLD_MS, &mut config.stale_threshold_ms),
            (ENV_KILL_DEADLINE_MS, &mut config.kill_deadline_ms),
        ];

        for (key, slot) in fields {
            if let Some(value) = lookup(key) {
                *slot = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue { key, value })?;
            }
        }

        Ok(config)
    }

    /// Upper bound on a single kill sequence's wall time.
    pub const fn worst_case_kill_ms(&self) -> u64 {
        self.graceful_timeout_ms
            .saturating_add(self.settle_time_ms)
            .saturating_add(self.poll_interval_ms)
    }

    /// Check the timing invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        let worst_case_ms = self.worst_case_kill_ms();
        if worst_case_ms >= self.kill_deadline_ms {
            return Err(ConfigError::ExceedsDeadline {
                worst_case_ms,
                deadline_ms: self.kill_deadline_ms,
            });
        }

        Ok(())
    }

    pub const fn graceful_timeout(&self) -> Duration {
        Duration::from_millis(self.graceful_timeout_ms)
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub const fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }

    /// Copy with a different graceful timeout.
    #[must_use]
    pub const fn with_graceful_timeout_ms(mut self, graceful_timeout_ms: u64) -> Self {
        self.graceful_timeout_ms = graceful_timeout_ms;
        self
    }
}
