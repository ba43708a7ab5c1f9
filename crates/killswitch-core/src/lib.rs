//! Core domain types and ports for the killswitch watchdog.
//!
//! This crate is pure: it defines what a kill looks like (`KillResult`),
//! what the persisted trading state looks like (`StateSnapshot`), how the
//! watchdog is configured (`WatchdogConfig`) and the `ProcessSignaller` port
//! that OS-facing adapters implement. No signals are sent from here.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_GRACEFUL_TIMEOUT_MS, DEFAULT_KILL_DEADLINE_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SETTLE_TIME_MS, DEFAULT_STALE_THRESHOLD_MS, WatchdogConfig,
};
pub use domain::{
    KillMethod, KillResult, KillSignal, OrchestratorStatus, Order, Position, ProcessId,
    SNAPSHOT_VERSION, SnapshotSummary, StateSnapshot,
};
pub use paths::{PathError, data_root, default_pid_file, default_state_file};
pub use ports::{ProcessSignaller, SignalError};
