//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::{EXIT_NOT_RUNNING, EXIT_OK};
use crate::presentation::{format_status, to_json};

/// Execute the status command.
///
/// Exits 0 when the tracked process is running and 3 otherwise.
pub fn execute(ctx: &CliContext, json: bool) -> Result<u8> {
    let status = ctx.switch.status(&ctx.pid_file, &ctx.state_file);

    if json {
        println!("{}", to_json(&status)?);
    } else {
        print!("{}", format_status(&status));
    }

    Ok(if status.is_running() {
        EXIT_OK
    } else {
        EXIT_NOT_RUNNING
    })
}
