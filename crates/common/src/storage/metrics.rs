//! Storage metrics tracking
//!
//! Atomic counters for connection acquisition, readable without locks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Connection pool counters
#[derive(Debug, Default)]
pub struct StorageMetrics {
    connections_acquired: AtomicU64,
    connections_timeout: AtomicU64,
    connections_error: AtomicU64,
    total_connection_time_ms: AtomicU64,
}

impl StorageMetrics {
    /// Create a new metrics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful connection acquisition
    pub fn record_connection_acquired(&self, duration_ms: u64) {
        self.connections_acquired.fetch_add(1, Ordering::Relaxed);
        self.total_connection_time_ms.fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// Record a connection timeout
    pub fn record_connection_timeout(&self) {
        self.connections_timeout.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a connection error
    pub fn record_connection_error(&self) {
        self.connections_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Connections handed out so far
    pub fn connections_acquired(&self) -> u64 {
        self.connections_acquired.load(Ordering::Relaxed)
    }

    /// Acquisitions that timed out
    pub fn connections_timeout(&self) -> u64 {
        self.connections_timeout.load(Ordering::Relaxed)
    }

    /// Acquisitions that failed for another reason
    pub fn connections_error(&self) -> u64 {
        self.connections_error.load(Ordering::Relaxed)
    }

    /// Average connection acquisition time in milliseconds
    pub fn avg_connection_time_ms(&self) -> u64 {
        let total = self.total_connection_time_ms.load(Ordering::Relaxed);
        let count = self.connections_acquired.load(Ordering::Relaxed);

        if count == 0 {
            0
        } else {
            total / count
        }
    }
}
