//! Kill orchestration: PID file → kill sequence → state snapshot.
//!
//! `KillSwitch` is the single entry point an adapter (CLI, health monitor)
//! calls. It always returns a structured report and never an error for
//! expected conditions, so callers can map outcomes to exit codes.

mod killswitch;
mod report;

pub use killswitch::KillSwitch;
pub use report::{KillReport, SnapshotStatus, StateReport, WatchdogStatus};
