//! Kill sequencing: SIGTERM → bounded wait → SIGKILL → verify.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use killswitch_core::{
    KillMethod, KillResult, KillSignal, ProcessId, ProcessSignaller, SignalError, WatchdogConfig,
};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

/// What happened when a signal was handed to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    Sent,
    /// The target was already gone, so the goal is achieved.
    TargetGone,
    /// Delivery failed for another reason. Logged, never fatal.
    Rejected,
}

/// Terminates one process with SIGTERM → SIGKILL escalation.
///
/// # Strategy
/// 1. If the process is not running, report `already_stopped`
/// 2. Send SIGTERM, then poll until `graceful_timeout_ms` elapses
/// 3. If still alive, send SIGKILL and wait `settle_time_ms`
/// 4. Report `force` if the process is gone, `failed` otherwise
///
/// Total wall time is bounded by
/// `graceful_timeout_ms + settle_time_ms + poll_interval_ms`.
///
/// A target that disappears between any probe and the following signal is a
/// success, never an error. Signal failures other than "target gone" are
/// logged and the sequence carries on; only the final liveness check decides
/// the outcome.
#[derive(Clone)]
pub struct KillSequencer {
    signaller: Arc<dyn ProcessSignaller>,
    graceful_timeout: Duration,
    poll_interval: Duration,
    settle_time: Duration,
}

impl KillSequencer {
    pub fn new(signaller: Arc<dyn ProcessSignaller>, config: &WatchdogConfig) -> Self {
        Self {
            signaller,
            graceful_timeout: config.graceful_timeout(),
            poll_interval: config.poll_interval(),
            settle_time: config.settle_time(),
        }
    }

    /// Run the kill sequence against `pid` to a terminal state.
    pub async fn run(&self, pid: ProcessId) -> KillResult {
        let started_at = Utc::now();
        let start = Instant::now();

        if !self.signaller.exists(pid) {
            debug!("PID {} is not running, nothing to kill", pid);
            return KillResult::already_stopped(pid, started_at, elapsed_ms(start));
        }

        // Phase 1: SIGTERM with bounded grace period
        info!(
            "Sending SIGTERM to PID {} (grace period {}ms)",
            pid,
            self.graceful_timeout.as_millis()
        );
        let graceful = self.deliver(pid, KillSignal::Graceful);
        let graceful_sent = graceful != Delivery::Rejected;

        if graceful == Delivery::TargetGone {
            return finish(pid, started_at, start, graceful_sent, false, KillMethod::Graceful);
        }

        if self.wait_for_exit(pid, start + self.graceful_timeout).await {
            info!("PID {} exited after SIGTERM", pid);
            return finish(pid, started_at, start, graceful_sent, false, KillMethod::Graceful);
        }

        // Phase 2: SIGKILL
        warn!(
            "PID {} still running after {}ms, escalating to SIGKILL",
            pid,
            self.graceful_timeout.as_millis()
        );
        let force = self.deliver(pid, KillSignal::Force);
        let force_sent = force != Delivery::Rejected;

        if force == Delivery::TargetGone {
            return finish(pid, started_at, start, graceful_sent, force_sent, KillMethod::Force);
        }

        // Phase 3: give the OS a moment to tear the process down, then verify
        sleep(self.settle_time).await;

        if self.signaller.exists(pid) {
            error!("PID {} is still running after SIGKILL", pid);
            finish(pid, started_at, start, graceful_sent, force_sent, KillMethod::Failed)
        } else {
            info!("PID {} terminated by SIGKILL", pid);
            finish(pid, started_at, start, graceful_sent, force_sent, KillMethod::Force)
        }
    }

    fn deliver(&self, pid: ProcessId, signal: KillSignal) -> Delivery {
        match self.signaller.send(pid, signal) {
            Ok(()) => Delivery::Sent,
            Err(SignalError::NoSuchProcess(_)) => {
                debug!("PID {} exited before {} was delivered", pid, signal);
                Delivery::TargetGone
            }
            Err(e) => {
                warn!("{} delivery failed, continuing sequence: {}", signal, e);
                Delivery::Rejected
            }
        }
    }

    /// Poll until the process disappears or `deadline` passes.
    ///
    /// Never sleeps past the deadline. Returns `true` if the process exited.
    async fn wait_for_exit(&self, pid: ProcessId, deadline: Instant) -> bool {
        loop {
            if !self.signaller.exists(pid) {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn finish(
    pid: ProcessId,
    started_at: DateTime<Utc>,
    start: Instant,
    graceful_sent: bool,
    force_sent: bool,
    method: KillMethod,
) -> KillResult {
    KillResult {
        pid,
        started_at,
        completed_at: Utc::now(),
        duration_ms: elapsed_ms(start),
        graceful_sent,
        force_sent,
        method,
        success: method.is_success(),
    }
}
