//! The watchdog's kill entry point.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use killswitch_core::{ConfigError, KillMethod, KillResult, ProcessSignaller, WatchdogConfig};
use tracing::{error, info, warn};

use super::report::{KillReport, SnapshotStatus, StateReport, WatchdogStatus};
use crate::pidfile::{check_stale, read_pidfile, remove_pidfile};
use crate::process::{DefaultSignaller, KillSequencer};
use crate::snapshot::{exceeds_threshold, read_snapshot, write_snapshot};

/// Terminates the tracked process and records the outcome.
///
/// Holds the watchdog's configuration and signaller for its whole lifetime;
/// every operation reads them from here rather than from global state.
///
/// A signaller that cannot observe liveness must report pids as alive. The
/// kill then ends as `failed` and leaves the PID file in place; reporting
/// them absent would turn every kill into an `already_stopped` success.
#[derive(Clone)]
pub struct KillSwitch {
    config: WatchdogConfig,
    signaller: Arc<dyn ProcessSignaller>,
    sequencer: KillSequencer,
}

impl KillSwitch {
    /// Create a kill switch after validating `config`.
    pub fn new(
        config: WatchdogConfig,
        signaller: Arc<dyn ProcessSignaller>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sequencer = KillSequencer::new(Arc::clone(&signaller), &config);
        Ok(Self {
            config,
            signaller,
            sequencer,
        })
    }

    /// Create a kill switch that signals real OS processes.
    pub fn with_default_signaller(config: WatchdogConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(DefaultSignaller::new()))
    }

    pub const fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// Kill the process recorded in `pid_file` and flag the snapshot in
    /// `state_file` if SIGKILL was needed.
    ///
    /// # Strategy
    /// 1. Read the PID file; no PID means `NotFound` and nothing is signalled
    /// 2. If the PID is dead, remove the stale PID file and stop
    /// 3. Run the kill sequence
    /// 4. Remove the PID file only if the kill succeeded
    /// 5. Read the snapshot (best effort) and, after a forced kill, rewrite
    ///    it with `forced_kill: true`
    pub async fn kill(&self, pid_file: &Path, state_file: &Path) -> KillReport {
        let Some(pid) = read_pidfile(pid_file) else {
            warn!("No valid PID in {}, nothing to kill", pid_file.display());
            return KillReport::NotFound {
                pid_file: pid_file.to_path_buf(),
            };
        };

        if !self.signaller.exists(pid) {
            info!(
                "PID {} from {} is not running, removing stale PID file",
                pid,
                pid_file.display()
            );
            return KillReport::Completed {
                result: KillResult::already_stopped(pid, Utc::now(), 0),
                pid_file_removed: remove_pidfile(pid_file),
                state_snapshot: None,
            };
        }

        let result = self.sequencer.run(pid).await;
        info!(
            "Kill sequence for PID {} finished: {} in {}ms",
            pid, result.method, result.duration_ms
        );

        let pid_file_removed = if result.success {
            remove_pidfile(pid_file)
        } else {
            error!(
                "PID {} survived the kill sequence, leaving {} in place",
                pid,
                pid_file.display()
            );
            false
        };

        let state_snapshot = self.reconcile_snapshot(state_file, result.method);

        KillReport::Completed {
            result,
            pid_file_removed,
            state_snapshot,
        }
    }

    /// Inspect the PID file and state snapshot without signalling anything.
    pub fn status(&self, pid_file: &Path, state_file: &Path) -> WatchdogStatus {
        let process = check_stale(pid_file, self.signaller.as_ref());
        let snapshot = read_snapshot(state_file).map(|snapshot| {
            let age_ms = snapshot.age_ms_at(Utc::now());
            SnapshotStatus::new(&snapshot, age_ms)
        });
        let snapshot_stale = snapshot
            .as_ref()
            .is_none_or(|status| exceeds_threshold(status.age_ms, self.config.stale_threshold_ms));

        WatchdogStatus {
            pid_file: pid_file.to_path_buf(),
            process,
            state_file: state_file.to_path_buf(),
            snapshot,
            snapshot_stale,
        }
    }

    /// Read the snapshot after a kill and flag it if SIGKILL was needed.
    ///
    /// Never fails the kill: a missing snapshot or a failed rewrite is only
    /// logged.
    fn reconcile_snapshot(&self, state_file: &Path, method: KillMethod) -> Option<StateReport> {
        let Some(snapshot) = read_snapshot(state_file) else {
            warn!(
                "No readable state snapshot at {}, verify open positions and orders manually",
                state_file.display()
            );
            return None;
        };

        let age_ms = snapshot.age_ms_at(Utc::now());
        let stale = exceeds_threshold(age_ms, self.config.stale_threshold_ms);
        if stale {
            warn!(
                "State snapshot is {}ms old (threshold {}ms), positions may have changed since",
                age_ms, self.config.stale_threshold_ms
            );
        }

        let mut forced_kill_marked = false;
        if method == KillMethod::Force {
            let marked = snapshot.with_forced_kill(stale);
            match write_snapshot(&marked, state_file) {
                Ok(()) => {
                    info!("Marked state snapshot {} as force-killed", state_file.display());
                    forced_kill_marked = true;
                }
                Err(e) => {
                    error!("Failed to mark state snapshot as force-killed: {}", e);
                }
            }
        }

        Some(StateReport::new(
            snapshot.summary,
            age_ms,
            stale,
            forced_kill_marked,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pidfile::write_pidfile;
    use killswitch_core::{
        KillSignal, OrchestratorStatus, Position, ProcessId, SignalError, StateSnapshot,
    };
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    /// Fake process table: a single pid with scripted reactions to signals.
    struct FakeSignaller {
        alive: Mutex<bool>,
        dies_on: Option<KillSignal>,
    }

    impl FakeSignaller {
        fn running(dies_on: Option<KillSignal>) -> Arc<Self> {
            Arc::new(Self {
                alive: Mutex::new(true),
                dies_on,
            })
        }

        fn dead() -> Arc<Self> {
            Arc::new(Self {
                alive: Mutex::new(false),
                dies_on: None,
            })
        }
    }

    impl ProcessSignaller for FakeSignaller {
        fn exists(&self, _pid: ProcessId) -> bool {
            *self.alive.lock().unwrap()
        }

        fn send(&self, pid: ProcessId, signal: KillSignal) -> Result<(), SignalError> {
            let mut alive = self.alive.lock().unwrap();
            if !*alive {
                return Err(SignalError::NoSuchProcess(pid));
            }
            if self.dies_on == Some(signal) {
                *alive = false;
            }
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        pid_file: std::path::PathBuf,
        state_file: std::path::PathBuf,
    }

    fn fixture(with_snapshot: bool) -> Fixture {
        let dir = tempdir().unwrap();
        let pid_file = dir.path().join("trader.pid");
        let state_file = dir.path().join("state.json");

        write_pidfile(&pid_file, ProcessId::new(5555).unwrap()).unwrap();
        if with_snapshot {
            let snapshot = StateSnapshot::build(
                OrchestratorStatus::default(),
                vec![
                    Position::new("BTC-YES", "long", 10.0, 0.5),
                    Position::new("ETH-NO", "long", 20.0, 0.6),
                ],
                vec![],
            );
            write_snapshot(&snapshot, &state_file).unwrap();
        }

        Fixture {
            _dir: dir,
            pid_file,
            state_file,
        }
    }

    fn fast_config() -> WatchdogConfig {
        WatchdogConfig {
            graceful_timeout_ms: 200,
            poll_interval_ms: 20,
            settle_time_ms: 20,
            ..Default::default()
        }
    }

    fn switch(signaller: Arc<FakeSignaller>) -> KillSwitch {
        KillSwitch::new(fast_config(), signaller).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = WatchdogConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(KillSwitch::with_default_signaller(config).is_err());
    }

    /// Signaller that can neither observe liveness nor deliver signals.
    struct BlindSignaller;

    impl ProcessSignaller for BlindSignaller {
        fn exists(&self, _pid: ProcessId) -> bool {
            true
        }

        fn send(&self, pid: ProcessId, signal: KillSignal) -> Result<(), SignalError> {
            Err(SignalError::Failed {
                pid,
                reason: format!("{signal} is not supported on this platform"),
            })
        }
    }

    #[tokio::test]
    async fn unobservable_process_is_never_reported_gone() {
        let f = fixture(true);
        let switch = KillSwitch::new(fast_config(), Arc::new(BlindSignaller)).unwrap();

        let report = switch.kill(&f.pid_file, &f.state_file).await;

        assert_eq!(report.method(), Some(KillMethod::Failed));
        assert!(!report.is_success());
        assert!(f.pid_file.exists());
    }

    #[tokio::test]
    async fn missing_pid_file_is_not_found() {
        let f = fixture(true);
        std::fs::remove_file(&f.pid_file).unwrap();

        let report = switch(FakeSignaller::running(None))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(
            report,
            KillReport::NotFound {
                pid_file: f.pid_file.clone()
            }
        );
    }

    #[tokio::test]
    async fn dead_pid_removes_stale_pid_file() {
        let f = fixture(true);

        let report = switch(FakeSignaller::dead())
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(report.method(), Some(KillMethod::AlreadyStopped));
        assert!(report.is_success());
        assert!(!f.pid_file.exists());
    }

    #[tokio::test]
    async fn graceful_kill_removes_pid_file_and_keeps_snapshot_unmarked() {
        let f = fixture(true);

        let report = switch(FakeSignaller::running(Some(KillSignal::Graceful)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(report.method(), Some(KillMethod::Graceful));
        assert!(!f.pid_file.exists());

        let state = report.state_snapshot().expect("state report");
        assert_eq!(state.open_positions, 2);
        assert!(!state.forced_kill_marked);
        assert!(!read_snapshot(&f.state_file).unwrap().forced_kill);
    }

    #[tokio::test]
    async fn forced_kill_marks_snapshot() {
        let f = fixture(true);

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(report.method(), Some(KillMethod::Force));
        assert!(!f.pid_file.exists());

        let state = report.state_snapshot().expect("state report");
        assert!(state.forced_kill_marked);
        assert!(!state.stale);
        assert!((state.total_exposure - 17.0).abs() < 1e-9);

        let stored = read_snapshot(&f.state_file).unwrap();
        assert!(stored.forced_kill);
        assert!(!stored.stale_warning);
        assert_eq!(stored.summary.open_positions, 2);
    }

    #[tokio::test]
    async fn forced_kill_flags_stale_snapshot() {
        let f = fixture(false);
        let mut snapshot = StateSnapshot::build(OrchestratorStatus::default(), vec![], vec![]);
        snapshot.timestamp = Utc::now() - chrono::Duration::seconds(30);
        write_snapshot(&snapshot, &f.state_file).unwrap();

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert!(report.state_snapshot().unwrap().stale);
        let stored = read_snapshot(&f.state_file).unwrap();
        assert!(stored.forced_kill);
        assert!(stored.stale_warning);
    }

    #[tokio::test]
    async fn forced_kill_marks_partial_snapshot() {
        let f = fixture(false);
        let written = format!(
            r#"{{"version":1,"timestamp":"{}","pid":5555,"positions":[],"orders":[]}}"#,
            Utc::now().to_rfc3339()
        );
        std::fs::write(&f.state_file, written).unwrap();

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(report.method(), Some(KillMethod::Force));
        let state = report.state_snapshot().expect("state report");
        assert!(state.forced_kill_marked);
        assert_eq!(state.open_positions, 0);

        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&f.state_file).unwrap()).unwrap();
        assert_eq!(stored["forced_kill"], true);
        assert_eq!(stored["pid"], 5555);
    }

    #[tokio::test]
    async fn failed_snapshot_rewrite_does_not_fail_kill() {
        let f = fixture(true);
        // A non-empty directory where the temp file goes makes the rewrite fail
        let blocker = f.state_file.with_file_name("state.json.tmp");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("occupant"), "x").unwrap();

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert!(report.is_success());
        assert_eq!(report.method(), Some(KillMethod::Force));
        assert!(!f.pid_file.exists());

        let state = report.state_snapshot().expect("state report");
        assert!(!state.forced_kill_marked);
        assert_eq!(state.open_positions, 2);
        assert!(!read_snapshot(&f.state_file).unwrap().forced_kill);
    }

    #[tokio::test]
    async fn corrupt_snapshot_does_not_fail_kill() {
        let f = fixture(false);
        std::fs::write(&f.state_file, "{oops").unwrap();

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert!(report.is_success());
        assert_eq!(report.method(), Some(KillMethod::Force));
        assert!(report.state_snapshot().is_none());
        assert_eq!(std::fs::read_to_string(&f.state_file).unwrap(), "{oops");
    }

    #[tokio::test]
    async fn missing_snapshot_does_not_fail_kill() {
        let f = fixture(false);

        let report = switch(FakeSignaller::running(Some(KillSignal::Force)))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert!(report.is_success());
        assert_eq!(report.method(), Some(KillMethod::Force));
        assert!(report.state_snapshot().is_none());
        assert!(!f.state_file.exists());
    }

    #[tokio::test]
    async fn failed_kill_leaves_pid_file_in_place() {
        let f = fixture(true);

        let report = switch(FakeSignaller::running(None))
            .kill(&f.pid_file, &f.state_file)
            .await;

        assert_eq!(report.method(), Some(KillMethod::Failed));
        assert!(!report.is_success());
        assert!(f.pid_file.exists());
        assert!(!read_snapshot(&f.state_file).unwrap().forced_kill);
    }

    #[test]
    fn status_reports_running_process_and_fresh_snapshot() {
        let f = fixture(true);
        let status = switch(FakeSignaller::running(None)).status(&f.pid_file, &f.state_file);

        assert!(status.is_running());
        assert_eq!(status.process.pid, ProcessId::new(5555));
        assert!(!status.snapshot_stale);
        assert_eq!(status.snapshot.unwrap().summary.open_positions, 2);
    }

    #[test]
    fn status_reports_stale_pid_and_missing_snapshot() {
        let f = fixture(false);
        let status = switch(FakeSignaller::dead()).status(&f.pid_file, &f.state_file);

        assert!(!status.is_running());
        assert!(status.process.is_stale);
        assert!(status.snapshot.is_none());
        assert!(status.snapshot_stale);
    }
}
