//! Process signalling for the watchdog.
//!
//! Provides two layers:
//! - `DefaultSignaller`: the `ProcessSignaller` port backed by `kill(2)`
//! - `KillSequencer`: SIGTERM → bounded wait → SIGKILL → verify

mod sequencer;
mod signaller;

pub use sequencer::KillSequencer;
pub use signaller::DefaultSignaller;
