//! `kill(2)`-backed implementation of the `ProcessSignaller` port.

use killswitch_core::{KillSignal, ProcessId, ProcessSignaller, SignalError};
#[cfg(unix)]
use tracing::debug;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Probes and signals processes through the OS.
///
/// # Platform behavior
/// - **Unix**: null signal for probing, SIGTERM/SIGKILL for termination
/// - **Other**: liveness cannot be observed, so every pid is reported alive
///   and every send is rejected. A kill then ends as `failed` and the PID
///   file is kept, rather than claiming a process is gone when it may not be.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSignaller;

impl DefaultSignaller {
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessSignaller for DefaultSignaller {
    fn exists(&self, pid: ProcessId) -> bool {
        #[cfg(unix)]
        {
            probe_unix(pid)
        }

        #[cfg(not(unix))]
        {
            let _ = pid;
            true
        }
    }

    fn send(&self, pid: ProcessId, signal: KillSignal) -> Result<(), SignalError> {
        #[cfg(unix)]
        {
            send_unix(pid, signal)
        }

        #[cfg(not(unix))]
        {
            Err(SignalError::Failed {
                pid,
                reason: format!("{signal} is not supported on this platform"),
            })
        }
    }
}

/// Check if a PID exists using the null signal.
///
/// The null signal performs permission and existence checks without
/// delivering anything.
#[cfg(unix)]
fn probe_unix(pid: ProcessId) -> bool {
    let result = signal::kill(Pid::from_raw(pid.as_raw()), None);
    if let Err(e) = result
        && !matches!(e, Errno::ESRCH | Errno::EPERM)
    {
        debug!("Liveness probe for PID {} failed with {}, treating as not running", pid, e);
    }
    liveness_from(result)
}

/// Map the outcome of a null-signal probe to "is alive".
#[cfg(unix)]
fn liveness_from(result: nix::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        // Process exists but we lack permission to signal it
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(unix)]
fn send_unix(pid: ProcessId, signal: KillSignal) -> Result<(), SignalError> {
    let nix_signal = match signal {
        KillSignal::Graceful => Signal::SIGTERM,
        KillSignal::Force => Signal::SIGKILL,
    };

    signal::kill(Pid::from_raw(pid.as_raw()), nix_signal).map_err(|e| match e {
        Errno::ESRCH => SignalError::NoSuchProcess(pid),
        Errno::EPERM => SignalError::PermissionDenied(pid),
        other => SignalError::Failed {
            pid,
            reason: other.to_string(),
        },
    })
}
