//! Kill command handler.

use anyhow::Result;
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::kill_exit_code;
use crate::presentation::{format_kill_report, to_json};

/// Execute the kill command and return the exit code.
///
/// The report is always printed, including for failed kills, so operators
/// see how far the sequence got.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<u8> {
    let report = ctx.switch.kill(&ctx.pid_file, &ctx.state_file).await;

    match report.method() {
        Some(method) if report.is_success() => info!("Kill finished: {method}"),
        Some(method) => warn!("Kill finished: {method}"),
        None => info!("Nothing to kill"),
    }

    if json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", format_kill_report(&report));
    }

    Ok(kill_exit_code(&report))
}
