//! Pool-level types shared by storage backends

use std::fmt::Debug;

/// Connection pool introspection
pub trait ConnectionPool: Send + Sync + Debug {
    /// Check pool health by borrowing a connection
    fn health_check(&self) -> HealthStatus;

    /// Snapshot of pool metrics
    fn metrics(&self) -> PoolMetrics;
}

/// Health status of the storage system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub healthy: bool,

    /// Number of open connections
    pub active_connections: usize,

    /// Number of idle connections
    pub idle_connections: usize,

    /// Maximum pool size
    pub max_connections: usize,

    /// Error message if unhealthy
    pub message: Option<String>,
}

impl HealthStatus {
    /// Create a healthy status
    pub const fn healthy(active: usize, idle: usize, max: usize) -> Self {
        Self {
            healthy: true,
            active_connections: active,
            idle_connections: idle,
            max_connections: max,
            message: None,
        }
    }

    /// Create an unhealthy status
    pub const fn unhealthy(message: String) -> Self {
        Self {
            healthy: false,
            active_connections: 0,
            idle_connections: 0,
            max_connections: 0,
            message: Some(message),
        }
    }
}

/// Connection pool metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    /// Total connections acquired
    pub connections_acquired: u64,

    /// Total connection timeouts
    pub connections_timeout: u64,

    /// Total connection errors
    pub connections_error: u64,

    /// Average connection acquisition time (milliseconds)
    pub avg_acquisition_time_ms: u64,
}

#[cfg(test)]
mod tests {
    //! Unit tests for storage::types.
    use super::*;

    #[test]
    fn test_health_status_constructors() {
        let status = HealthStatus::healthy(3, 1, 4);
        assert!(status.healthy);
        assert_eq!(status.max_connections, 4);
        assert!(status.message.is_none());

        let status = HealthStatus::unhealthy("Pool exhausted".to_string());
        assert!(!status.healthy);
        assert_eq!(status.active_connections, 0);
        assert_eq!(status.message.as_deref(), Some("Pool exhausted"));
    }

    #[test]
    fn test_pool_metrics_default() {
        assert_eq!(PoolMetrics::default().connections_acquired, 0);
    }
}
