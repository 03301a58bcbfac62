//! Application context - dependency injection container

use std::sync::Arc;

use profilebox_core::{
    ProfileRepository, ProfileSeeder, ProfileService, SectionRepository, SessionService,
};
use profilebox_domain::{Config, DatabaseBackend, ProfileBoxError, Result};
use profilebox_infra::{
    DbManager, FsPhotoStore, PgManager, PostgresProfileRepository, SqliteProfileRepository,
};
use tracing::{error, info};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// The open database, whichever backend the config selected
pub enum Storage {
    Sqlite(Arc<DbManager>),
    Postgres(Arc<PgManager>),
}

impl Storage {
    /// Open the configured backend. Nothing is migrated yet.
    pub async fn open(config: &Config) -> Result<Self> {
        let db = &config.database;
        info!(backend = db.backend.as_str(), "opening database");

        match db.backend {
            DatabaseBackend::Sqlite => Ok(Self::Sqlite(Arc::new(DbManager::from_config(db)?))),
            DatabaseBackend::Postgres => {
                Ok(Self::Postgres(Arc::new(PgManager::from_config(db).await?)))
            }
        }
    }

    pub const fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Apply pending migrations, returning the versions applied.
    pub async fn run_migrations(&self) -> Result<Vec<i64>> {
        match self {
            Self::Sqlite(db) => {
                let db = Arc::clone(db);
                tokio::task::spawn_blocking(move || db.run_migrations())
                    .await
                    .map_err(|e| ProfileBoxError::Internal(format!("Task join error: {e}")))?
            }
            Self::Postgres(db) => db.run_migrations().await,
        }
    }

    /// Highest applied schema version.
    pub async fn schema_version(&self) -> Result<Option<i64>> {
        match self {
            Self::Sqlite(db) => {
                let db = Arc::clone(db);
                tokio::task::spawn_blocking(move || db.schema_version())
                    .await
                    .map_err(|e| ProfileBoxError::Internal(format!("Task join error: {e}")))?
            }
            Self::Postgres(db) => db.schema_version().await,
        }
    }

    async fn health_check(&self) -> Result<()> {
        match self {
            Self::Sqlite(db) => {
                let db = Arc::clone(db);
                tokio::task::spawn_blocking(move || db.health_check())
                    .await
                    .map_err(|e| ProfileBoxError::Internal(format!("Task join error: {e}")))?
            }
            Self::Postgres(db) => db.health_check().await,
        }
    }

    fn repositories(&self) -> (Arc<dyn ProfileRepository>, Arc<dyn SectionRepository>) {
        match self {
            Self::Sqlite(db) => {
                let repo = Arc::new(SqliteProfileRepository::new(Arc::clone(db)));
                let profiles: Arc<dyn ProfileRepository> = repo.clone();
                let sections: Arc<dyn SectionRepository> = repo;
                (profiles, sections)
            }
            Self::Postgres(db) => {
                let repo = Arc::new(PostgresProfileRepository::new(Arc::clone(db)));
                let profiles: Arc<dyn ProfileRepository> = repo.clone();
                let sections: Arc<dyn SectionRepository> = repo;
                (profiles, sections)
            }
        }
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub storage: Storage,
    pub profiles: ProfileService,
    pub sessions: SessionService,
    pub photos: Arc<FsPhotoStore>,
}

impl AppContext {
    /// Create a context from the configuration found by the loader
    pub async fn new() -> Result<Self> {
        Self::new_with_config(profilebox_infra::load()?).await
    }

    /// Create a context with an explicit configuration
    ///
    /// Opens the database and brings its schema up to date. Any failure here
    /// is fatal for the caller; there is no fallback store.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let storage = Storage::open(&config).await?;
        let applied = storage.run_migrations().await.map_err(|e| {
            error!(error = %e, "schema migration failed");
            e
        })?;
        if !applied.is_empty() {
            info!(?applied, "database schema upgraded");
        }

        let (profiles, sections) = storage.repositories();
        let photos = Arc::new(FsPhotoStore::from_config(&config.photos));
        let profile_service = ProfileService::new(Arc::clone(&profiles), Arc::clone(&sections))
            .with_photo_store(photos.clone());
        let sessions = SessionService::new(ProfileSeeder::new(profiles, sections));

        info!(backend = storage.backend().as_str(), "ProfileBox initialized");
        Ok(Self { config, storage, profiles: profile_service, sessions, photos })
    }

    /// Check the database and the photo directory
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        let database = match self.storage.health_check().await {
            Ok(()) => {
                status.schema_version = self.storage.schema_version().await.ok().flatten();
                ComponentHealth::healthy("database")
            }
            Err(e) => ComponentHealth::unhealthy("database", e.to_string()),
        };
        status = status.add_component(database);

        let dir = self.photos.directory();
        let photo_store = if dir.exists() && !dir.is_dir() {
            let message = format!("{} is not a directory", dir.display());
            ComponentHealth::unhealthy("photo_store", message)
        } else {
            ComponentHealth::healthy("photo_store")
        };
        status.add_component(photo_store)
    }
}
