//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `execute(ctx: &CliContext, json: bool) -> Result<u8>`, async
//!   only where the runtime call is
//! - Call into `KillSwitch`, render the result, return the process exit code.
//!
//! Handlers should NOT signal processes or touch the PID/state files directly.

pub mod kill;
pub mod snapshot;
pub mod status;
