//! Human-readable rendering of kill and status results.

use std::fmt::Write;

use killswitch_runtime::{KillReport, StateReport, WatchdogStatus};

/// Multi-line summary of a kill.
pub fn format_kill_report(report: &KillReport) -> String {
    let mut out = String::new();
    match report {
        KillReport::NotFound { pid_file } => {
            let _ = writeln!(out, "No running process recorded in {}", pid_file.display());
        }
        KillReport::Completed {
            result,
            pid_file_removed,
            state_snapshot,
        } => {
            let _ = writeln!(
                out,
                "Process {}: {} in {}ms (SIGTERM sent: {}, SIGKILL sent: {})",
                result.pid,
                result.method,
                result.duration_ms,
                yes_no(result.graceful_sent),
                yes_no(result.force_sent)
            );
            if !result.success {
                let _ = writeln!(out, "Process is still alive; PID file left in place");
            } else if *pid_file_removed {
                let _ = writeln!(out, "PID file removed");
            }
            match state_snapshot {
                Some(state) => out.push_str(&format_state_report(state)),
                None => {
                    let _ = writeln!(out, "No state snapshot found");
                }
            }
        }
    }
    out
}

fn format_state_report(state: &StateReport) -> String {
    let mut out = format_snapshot_line(
        state.open_positions,
        state.open_orders,
        state.total_exposure,
        state.age_ms,
    );
    if state.stale {
        out.push_str("Warning: snapshot was stale at kill time\n");
    }
    if state.forced_kill_marked {
        out.push_str("Snapshot marked as forced kill\n");
    }
    out
}

/// One-line snapshot summary shared by `kill` and `status`.
pub fn format_snapshot_line(
    open_positions: usize,
    open_orders: usize,
    total_exposure: f64,
    age_ms: i64,
) -> String {
    format!(
        "Snapshot: {open_positions} position(s), {open_orders} order(s), exposure {total_exposure:.2}, age {age_ms}ms\n"
    )
}

/// Multi-line summary of the watchdog status.
pub fn format_status(status: &WatchdogStatus) -> String {
    let mut out = String::new();
    match (status.process.pid, status.is_running()) {
        (Some(pid), true) => {
            let _ = writeln!(out, "Process {pid} is running");
        }
        (Some(pid), false) => {
            let _ = writeln!(
                out,
                "Process {pid} is not running (stale PID file {})",
                status.pid_file.display()
            );
        }
        (None, _) => {
            let _ = writeln!(out, "No PID recorded in {}", status.pid_file.display());
        }
    }

    match &status.snapshot {
        Some(snapshot) => {
            out.push_str(&format_snapshot_line(
                snapshot.summary.open_positions,
                snapshot.summary.open_orders,
                snapshot.summary.total_exposure,
                snapshot.age_ms,
            ));
            if snapshot.forced_kill {
                out.push_str("Snapshot was written after a forced kill\n");
            }
        }
        None => {
            let _ = writeln!(out, "No state snapshot at {}", status.state_file.display());
        }
    }
    if status.snapshot_stale {
        out.push_str("Warning: snapshot is stale\n");
    }
    out
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
