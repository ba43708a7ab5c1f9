//! Last-known trading state persisted for recovery after a kill.
//!
//! Field names are a stable contract with external readers: flat,
//! lower-snake-case, and never renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::process::ProcessId;

/// Current on-disk snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// An open position as reported by the tracked process.
///
/// Only `size` and `entry_price` are interpreted here; missing numbers read
/// as zero. Any other fields the producer writes are carried through
/// unchanged in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub market: String,
    pub side: String,
    pub size: f64,
    pub entry_price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Position {
    pub fn new(market: impl Into<String>, side: impl Into<String>, size: f64, entry_price: f64) -> Self {
        Self {
            market: market.into(),
            side: side.into(),
            size,
            entry_price,
            extra: Map::new(),
        }
    }

    /// Notional exposure of this position.
    pub fn exposure(&self) -> f64 {
        self.size * self.entry_price
    }
}

/// An open order as reported by the tracked process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub market: String,
    pub side: String,
    pub price: f64,
    pub size: f64,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregates derived from `positions` and `orders`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSummary {
    pub open_positions: usize,
    pub open_orders: usize,
    pub total_exposure: f64,
}

impl SnapshotSummary {
    /// Compute the summary for the given positions and orders.
    pub fn compute(positions: &[Position], orders: &[Order]) -> Self {
        Self {
            open_positions: positions.len(),
            open_orders: orders.len(),
            total_exposure: positions.iter().map(Position::exposure).sum(),
        }
    }
}

/// State of the tracked process's own orchestrator at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorStatus {
    pub state: String,
    pub started_at: Option<DateTime<Utc>>,
    pub error_count: u32,
}

/// Persisted last-known state of the tracked process.
///
/// Only `timestamp` is required when reading. Every other field falls back to
/// its default, and a missing `summary` is recomputed from `positions` and
/// `orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRecord")]
pub struct StateSnapshot {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    /// Producer's pid; `None` when the file does not record one.
    pub pid: Option<ProcessId>,
    pub forced_kill: bool,
    pub stale_warning: bool,
    pub positions: Vec<Position>,
    pub orders: Vec<Order>,
    pub summary: SnapshotSummary,
    pub orchestrator: OrchestratorStatus,
}

/// On-disk shape accepted when reading a snapshot.
#[derive(Deserialize)]
struct SnapshotRecord {
    #[serde(default = "current_version")]
    version: u32,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    pid: Option<ProcessId>,
    #[serde(default)]
    forced_kill: bool,
    #[serde(default)]
    stale_warning: bool,
    #[serde(default)]
    positions: Vec<Position>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    summary: Option<SnapshotSummary>,
    #[serde(default)]
    orchestrator: OrchestratorStatus,
}

const fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

impl From<SnapshotRecord> for StateSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        let summary = record
            .summary
            .unwrap_or_else(|| SnapshotSummary::compute(&record.positions, &record.orders));
        Self {
            version: record.version,
            timestamp: record.timestamp,
            pid: record.pid,
            forced_kill: record.forced_kill,
            stale_warning: record.stale_warning,
            positions: record.positions,
            orders: record.orders,
            summary,
            orchestrator: record.orchestrator,
        }
    }
}

impl StateSnapshot {
    /// Build a fresh snapshot for the calling process.
    ///
    /// The summary is always derived from `positions` and `orders`, and the
    /// kill flags always start cleared.
    pub fn build(
        orchestrator: OrchestratorStatus,
        positions: Vec<Position>,
        orders: Vec<Order>,
    ) -> Self {
        let summary = SnapshotSummary::compute(&positions, &orders);
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: Utc::now(),
            pid: Some(ProcessId::current()),
            forced_kill: false,
            stale_warning: false,
            positions,
            orders,
            summary,
            orchestrator,
        }
    }

    /// Copy of this snapshot flagged as force-killed.
    ///
    /// `self` is left untouched, so holders of the original keep seeing the
    /// pre-kill data.
    #[must_use]
    pub fn with_forced_kill(&self, stale: bool) -> Self {
        Self {
            forced_kill: true,
            stale_warning: stale,
            ..self.clone()
        }
    }

    /// Milliseconds elapsed between `timestamp` and `now`.
    pub fn age_ms_at(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_milliseconds()
    }
}
