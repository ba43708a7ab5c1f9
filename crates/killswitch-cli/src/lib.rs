//! Command-line adapter for the killswitch watchdog.
//!
//! Parses arguments, wires the runtime together in `bootstrap`, and maps
//! structured results to terminal output and exit codes. No kill logic
//! lives here.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, FileArgs};
pub use error::CliError;
pub use parser::Cli;
