#![allow(dead_code)]

use std::sync::Arc;

use profilebox_common::testing::TempDir;
use profilebox_core::{ProfileSeeder, ProfileService};
use profilebox_infra::database::{DbManager, SqliteProfileRepository};

pub const TEST_DB_KEY: &str = "profilebox-integration-test-key";

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub temp_dir: TempDir,
}

impl TestDatabase {
    /// Empty, unmigrated plain database.
    pub fn new() -> Self {
        Self::open(None)
    }

    /// Empty, unmigrated SQLCipher database.
    pub fn encrypted() -> Self {
        Self::open(Some(TEST_DB_KEY))
    }

    fn open(key: Option<&str>) -> Self {
        let temp_dir = TempDir::new("infra-test").expect("temp dir should be created");
        let manager = DbManager::new(temp_dir.db_path("AppData.db"), 4, key)
            .expect("db manager should be created");
        Self { manager: Arc::new(manager), temp_dir }
    }

    /// Fresh database with the current schema.
    pub fn migrated() -> Self {
        let db = Self::new();
        db.manager.run_migrations().expect("migrations should run");
        db
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    pub fn count(&self, sql: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(sql, [], |row| row.get(0)).expect("count query should succeed")
    }

    pub fn columns(&self, table: &str) -> Vec<String> {
        let conn = self.manager.get_connection().expect("connection should be available");
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)").unwrap();
        let names = stmt
            .query_map([table], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();
        names
    }

    pub fn repository(&self) -> Arc<SqliteProfileRepository> {
        Arc::new(SqliteProfileRepository::new(Arc::clone(&self.manager)))
    }

    pub fn service(&self) -> ProfileService {
        let repo = self.repository();
        ProfileService::new(repo.clone(), repo)
    }

    pub fn seeder(&self) -> ProfileSeeder {
        let repo = self.repository();
        ProfileSeeder::new(repo.clone(), repo)
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-profile tables as the first release created them.
pub const LEGACY_SCHEMA: &str = "
    CREATE TABLE Profiles (
        Username TEXT PRIMARY KEY,
        DisplayName TEXT,
        Brief TEXT,
        PhotoPath TEXT
    );
    CREATE TABLE Sections (
        Username TEXT NOT NULL,
        Section TEXT NOT NULL,
        Body TEXT,
        UpdatedAt TEXT,
        PRIMARY KEY (Username, Section)
    );
";
