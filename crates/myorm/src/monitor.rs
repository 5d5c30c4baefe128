//! Statement logging and pool observability hooks.
//!
//! Two small trait seams let callers watch the facade without changing its
//! behavior: [`SqlLogger`] receives every statement (with its bound
//! arguments) before execution when logging is enabled, and [`PoolMonitor`]
//! is notified around each connection acquire/release pair.

use crate::params::BindArgs;

/// Receives executed statements when logging is enabled.
pub trait SqlLogger: Send + Sync {
    /// Called before a statement executes, with its bound arguments as
    /// supplied by the caller (prior to row-binding expansion).
    fn log(&self, sql: &str, args: &BindArgs);
}

/// Stock logger emitting `tracing` debug events.
pub struct TracingLogger;

impl SqlLogger for TracingLogger {
    fn log(&self, sql: &str, args: &BindArgs) {
        tracing::debug!(target: "myorm::sql", args = ?args, "{sql}");
    }
}

/// Observes the facade's connection acquire/release pairs.
///
/// `pool` is the pool the caller selected; `None` means the default pool.
/// All methods default to no-ops.
pub trait PoolMonitor: Send + Sync {
    /// A connection was acquired from the pool.
    fn on_acquire(&self, _pool: Option<&str>) {}

    /// The connection was returned to the pool. Fires exactly once per
    /// acquire, on both the success and the failure path.
    fn on_release(&self, _pool: Option<&str>) {}
}

/// Monitor that ignores every event.
pub struct NoopMonitor;

impl PoolMonitor for NoopMonitor {}

/// Monitor emitting `tracing` trace events for each pool interaction.
pub struct TracingMonitor;

impl PoolMonitor for TracingMonitor {
    fn on_acquire(&self, pool: Option<&str>) {
        tracing::trace!(target: "myorm::pool", pool = pool.unwrap_or("<default>"), "acquired connection");
    }

    fn on_release(&self, pool: Option<&str>) {
        tracing::trace!(target: "myorm::pool", pool = pool.unwrap_or("<default>"), "released connection");
    }
}
