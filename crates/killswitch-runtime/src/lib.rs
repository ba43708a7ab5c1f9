//! OS-facing runtime for the killswitch watchdog.
//!
//! - `process` - liveness probing, signal delivery and the kill sequencer
//! - `pidfile` - reading, writing and staleness checks for the PID file
//! - `snapshot` - atomic persistence of the trading state snapshot
//! - `orchestrator` - `KillSwitch`, the single entry point callers invoke

#![deny(unsafe_code)]

pub mod orchestrator;
pub mod pidfile;
pub mod process;
pub mod snapshot;

pub use orchestrator::{KillReport, KillSwitch, SnapshotStatus, StateReport, WatchdogStatus};
pub use pidfile::{PidFileStatus, check_stale, read_pidfile, remove_pidfile, write_pidfile};
pub use process::{DefaultSignaller, KillSequencer};
pub use snapshot::{
    SnapshotError, is_snapshot_stale, read_snapshot, snapshot_age_ms, write_snapshot,
};
