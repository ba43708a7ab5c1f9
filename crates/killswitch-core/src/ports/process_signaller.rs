//! Process signalling port.
//!
//! Abstracts the two OS operations the watchdog relies on: probing whether a
//! pid is alive and delivering a termination signal. Implementations live in
//! adapters (e.g. killswitch-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and the error type (pure)
//! - Runtime owns the implementation (`kill(2)` via nix)
//! - Tests inject fakes to drive the kill sequence deterministically

use thiserror::Error;

use crate::domain::{KillSignal, ProcessId};

/// Why a signal could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The target no longer exists (`ESRCH`).
    #[error("No such process: {0}")]
    NoSuchProcess(ProcessId),

    /// The target exists but the caller may not signal it (`EPERM`).
    #[error("Permission denied signalling process {0}")]
    PermissionDenied(ProcessId),

    /// Any other delivery failure.
    #[error("Failed to signal process {pid}: {reason}")]
    Failed { pid: ProcessId, reason: String },
}

impl SignalError {
    /// Whether the failure means the target is already gone.
    pub const fn is_target_gone(&self) -> bool {
        matches!(self, Self::NoSuchProcess(_))
    }
}

/// Port for probing and signalling OS processes.
pub trait ProcessSignaller: Send + Sync {
    /// Whether `pid` currently refers to a live process.
    ///
    /// Must never fail: unconfirmed liveness is reported as `false`, except
    /// that a permission error means the process exists and is reported as
    /// `true`.
    fn exists(&self, pid: ProcessId) -> bool;

    /// Deliver `signal` to `pid`.
    fn send(&self, pid: ProcessId, signal: KillSignal) -> Result<(), SignalError>;

    /// Untyped liveness probe. Invalid pids (`<= 0`, out of range) are
    /// never alive.
    fn exists_raw(&self, raw: i64) -> bool {
        ProcessId::new(raw).is_some_and(|pid| self.exists(pid))
    }
}
