//! Metrics collection for the dispute engine.
//!
//! Counters are process-wide and lock-free; a [`MetricsSnapshot`] is a
//! serializable copy for reporting.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Global metrics instance.
static METRICS: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Get the global metrics instance.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS.get_or_init(|| Arc::new(Metrics::new()))
}

/// Application metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    // === Dispute Metrics ===
    /// Disputes opened
    pub disputes_created: AtomicU64,
    /// Evidence records attached
    pub evidence_added: AtomicU64,
    /// Disputes resolved by a moderator
    pub manual_resolutions: AtomicU64,

    // === Analysis Metrics ===
    /// Analyses that produced a result
    pub analyses_completed: AtomicU64,
    /// Analyses that failed and fell back to human review
    pub analyses_failed: AtomicU64,
    /// Analyses confident enough to resolve the dispute
    pub auto_resolutions: AtomicU64,
    /// Total analysis time in milliseconds
    pub analysis_time_ms_total: AtomicU64,

    // === Reputation Metrics ===
    /// Reputation updates applied
    pub reputation_updates: AtomicU64,

    // === Storage Metrics ===
    /// Collection writes
    pub storage_writes: AtomicU64,
    /// Failed reads or writes
    pub storage_errors: AtomicU64,
}

impl Metrics {
    /// Create a zeroed collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            disputes_created: AtomicU64::new(0),
            evidence_added: AtomicU64::new(0),
            manual_resolutions: AtomicU64::new(0),

            analyses_completed: AtomicU64::new(0),
            analyses_failed: AtomicU64::new(0),
            auto_resolutions: AtomicU64::new(0),
            analysis_time_ms_total: AtomicU64::new(0),

            reputation_updates: AtomicU64::new(0),

            storage_writes: AtomicU64::new(0),
            storage_errors: AtomicU64::new(0),
        }
    }

    /// Record a finished analysis.
    pub fn record_analysis(&self, duration: Duration, auto_resolved: bool) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
        self.analysis_time_ms_total
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        if auto_resolved {
            self.auto_resolutions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed analysis.
    pub fn record_analysis_failure(&self) {
        self.analyses_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a collection write.
    pub fn record_storage_write(&self, is_error: bool) {
        self.storage_writes.fetch_add(1, Ordering::Relaxed);
        if is_error {
            self.storage_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed collection read.
    pub fn record_storage_read_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            disputes_created: self.disputes_created.load(Ordering::Relaxed),
            evidence_added: self.evidence_added.load(Ordering::Relaxed),
            manual_resolutions: self.manual_resolutions.load(Ordering::Relaxed),
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            analyses_failed: self.analyses_failed.load(Ordering::Relaxed),
            auto_resolutions: self.auto_resolutions.load(Ordering::Relaxed),
            analysis_avg_time_ms: self.average_analysis_time_ms(),
            reputation_updates: self.reputation_updates.load(Ordering::Relaxed),
            storage_writes: self.storage_writes.load(Ordering::Relaxed),
            storage_errors: self.storage_errors.load(Ordering::Relaxed),
        }
    }

    fn average_analysis_time_ms(&self) -> u64 {
        let total = self.analysis_time_ms_total.load(Ordering::Relaxed);
        let count = self.analyses_completed.load(Ordering::Relaxed);
        if count > 0 { total / count } else { 0 }
    }
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub disputes_created: u64,
    pub evidence_added: u64,
    pub manual_resolutions: u64,
    pub analyses_completed: u64,
    pub analyses_failed: u64,
    pub auto_resolutions: u64,
    pub analysis_avg_time_ms: u64,
    pub reputation_updates: u64,
    pub storage_writes: u64,
    pub storage_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_analysis() {
        let metrics = Metrics::new();
        metrics.record_analysis(Duration::from_millis(3000), true);
        metrics.record_analysis(Duration::from_millis(1000), false);
        metrics.record_analysis_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.analyses_completed, 2);
        assert_eq!(snapshot.auto_resolutions, 1);
        assert_eq!(snapshot.analyses_failed, 1);
        assert_eq!(snapshot.analysis_avg_time_ms, 2000);
    }

    #[test]
    fn test_storage_counters() {
        let metrics = Metrics::new();
        metrics.record_storage_write(false);
        metrics.record_storage_write(true);
        metrics.record_storage_read_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.storage_writes, 2);
        assert_eq!(snapshot.storage_errors, 2);
    }
}
