//! Domain model for the watchdog.
//!
//! - `process` - process identity and the signals the watchdog can send
//! - `kill` - the outcome of one kill sequence
//! - `snapshot` - the persisted last-known trading state

mod kill;
mod process;
mod snapshot;

pub use kill::{KillMethod, KillResult};
pub use process::{KillSignal, ProcessId};
pub use snapshot::{
    OrchestratorStatus, Order, Position, SNAPSHOT_VERSION, SnapshotSummary, StateSnapshot,
};
