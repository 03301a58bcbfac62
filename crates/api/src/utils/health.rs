//! Health report for the `health` command
//!
//! The application is healthy only when every component is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall health of the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Highest applied schema version, when the database answered
    pub schema_version: Option<i64>,

    pub components: Vec<ComponentHealth>,

    pub checked_at: DateTime<Utc>,
}

impl HealthStatus {
    /// Healthy status with no components yet
    pub fn new() -> Self {
        Self { is_healthy: true, schema_version: None, components: Vec::new(), checked_at: Utc::now() }
    }

    /// Add a component and fold it into the overall verdict
    #[must_use]
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.is_healthy &= component.is_healthy;
        self.components.push(component);
        self
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g., "database", "photo_store")
    pub name: String,

    pub is_healthy: bool,

    /// Error description for unhealthy components
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
