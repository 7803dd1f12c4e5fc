//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only when the process starts
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one program instance
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    tweets_sent: AtomicU64,
    tweets_rejected: AtomicU64,
    slots_allocated: AtomicU64,
    lamports_debited: AtomicU64,
    scans_executed: AtomicU64,
    records_scanned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment accepted tweets
    pub fn increment_tweets_sent(&self) {
        self.tweets_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment refused tweets
    pub fn increment_tweets_rejected(&self) {
        self.tweets_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one slot allocation and the lamports it locked
    pub fn record_allocation(&self, lamports: u64) {
        self.slots_allocated.fetch_add(1, Ordering::Relaxed);
        self.lamports_debited.fetch_add(lamports, Ordering::Relaxed);
    }

    /// Record one finished scan and how many records it returned
    pub fn record_scan(&self, records: u64) {
        self.scans_executed.fetch_add(1, Ordering::Relaxed);
        self.records_scanned.fetch_add(records, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tweets_sent: self.tweets_sent.load(Ordering::Relaxed),
            tweets_rejected: self.tweets_rejected.load(Ordering::Relaxed),
            slots_allocated: self.slots_allocated.load(Ordering::Relaxed),
            lamports_debited: self.lamports_debited.load(Ordering::Relaxed),
            scans_executed: self.scans_executed.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub tweets_sent: u64,
    pub tweets_rejected: u64,
    pub slots_allocated: u64,
    pub lamports_debited: u64,
    pub scans_executed: u64,
    pub records_scanned: u64,
}
