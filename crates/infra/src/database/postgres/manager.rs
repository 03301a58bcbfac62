//! PostgreSQL connection manager.

use profilebox_domain::{DatabaseConfig, ProfileBoxError, Result};
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};

use super::migrations;
use crate::errors::map_pg_error;

/// Owns the client and the task driving its connection.
pub struct PgManager {
    client: Mutex<Client>,
    connection: JoinHandle<()>,
}

impl PgManager {
    /// Connect using a libpq-style string (`host=... user=...`) or a
    /// `postgres://` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await.map_err(|e| {
            error!(error = %e, "failed to connect to postgres");
            map_pg_error(e)
        })?;

        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "postgres connection terminated");
            }
        });

        info!("postgres connection established");
        Ok(Self { client: Mutex::new(client), connection })
    }

    /// Connect using the `[database]` config section.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let url = config.url.as_deref().filter(|u| !u.trim().is_empty()).ok_or_else(|| {
            ProfileBoxError::Config("database.url is required for the postgres backend".into())
        })?;
        Self::connect(url).await
    }

    /// Exclusive access to the client.
    pub async fn client(&self) -> MutexGuard<'_, Client> {
        self.client.lock().await
    }

    /// Apply every pending schema migration and return the versions applied.
    pub async fn run_migrations(&self) -> Result<Vec<i64>> {
        let mut client = self.client().await;
        migrations::run_migrations(&mut client).await
    }

    /// Highest applied schema version.
    pub async fn schema_version(&self) -> Result<Option<i64>> {
        let client = self.client().await;
        migrations::current_version(&client).await
    }

    /// Round-trip a trivial query.
    pub async fn health_check(&self) -> Result<()> {
        let client = self.client().await;
        if client.is_closed() {
            return Err(ProfileBoxError::Database("postgres connection closed".into()));
        }
        client.query_one("SELECT 1", &[]).await.map_err(map_pg_error)?;
        Ok(())
    }
}

impl Drop for PgManager {
    fn drop(&mut self) {
        self.connection.abort();
    }
}
