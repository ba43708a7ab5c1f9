//! Available subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Locations of the files shared with the tracked process.
///
/// Unset paths fall back to the defaults under the data directory.
#[derive(Debug, Clone, Default, Args)]
pub struct FileArgs {
    /// PID file written by the tracked process
    #[arg(long, env = "KILLSWITCH_PID_FILE")]
    pub pid_file: Option<PathBuf>,

    /// State snapshot file written by the tracked process
    #[arg(long, env = "KILLSWITCH_STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Terminate the tracked process (SIGTERM, then SIGKILL) and flag its snapshot
    Kill {
        #[command(flatten)]
        files: FileArgs,

        /// Milliseconds to wait after SIGTERM before escalating to SIGKILL
        #[arg(long)]
        graceful_timeout_ms: Option<u64>,
    },

    /// Show whether the tracked process is running and how fresh its snapshot is
    Status {
        #[command(flatten)]
        files: FileArgs,
    },

    /// Print the stored state snapshot
    Snapshot {
        /// State snapshot file written by the tracked process
        #[arg(long, env = "KILLSWITCH_STATE_FILE")]
        state_file: Option<PathBuf>,
    },
}
