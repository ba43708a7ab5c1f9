//! Persistence of the tracked process's last-known state.
//!
//! Writes are atomic (temp file + rename) so readers never observe a
//! half-written snapshot. Reads are tolerant: a missing, empty or corrupt
//! file reads as `None`.

mod error;
mod freshness;
mod io;

pub use error::SnapshotError;
pub use freshness::{is_snapshot_stale, snapshot_age_ms};
pub(crate) use freshness::exceeds_threshold;
pub use io::{read_snapshot, write_snapshot};
