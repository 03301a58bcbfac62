//! Schema and health commands

use profilebox_domain::{DatabaseBackend, Result as DomainResult};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;
use crate::utils::health::HealthStatus;

/// Outcome of an explicit migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub backend: DatabaseBackend,
    /// Versions applied by this run
    pub applied: Vec<i64>,
    pub current_version: Option<i64>,
}

/// Apply pending migrations. The context already migrates on startup, so
/// this normally reports nothing applied.
pub async fn migrate(ctx: &AppContext) -> DomainResult<MigrationReport> {
    execute_command("database::migrate", || async {
        let applied = ctx.storage.run_migrations().await?;
        let current_version = ctx.storage.schema_version().await?;
        Ok(MigrationReport { backend: ctx.storage.backend(), applied, current_version })
    })
    .await
}

/// Database and photo directory health.
pub async fn health(ctx: &AppContext) -> HealthStatus {
    ctx.health_check().await
}
