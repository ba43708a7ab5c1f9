//! PID file management for the tracked process.
//!
//! The tracked process writes its own PID file at startup; the watchdog
//! reads it, checks it for staleness and removes it after a kill.
//!
//! # Guarantees
//! - Reads never fail: missing or malformed content is reported as "no PID"
//! - Removal is idempotent
//! - No locking: the record's owner is its only writer, last writer wins

mod io;
mod stale;

pub use io::{read_pidfile, remove_pidfile, write_pidfile};
pub use stale::{PidFileStatus, check_stale};
