#![allow(dead_code)]

use profilebox_common::testing::TempDir;
use profilebox_domain::{Config, DatabaseConfig, PhotoConfig};
use profilebox_lib::AppContext;

/// Config pointing at throwaway locations inside `temp_dir`.
pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            path: temp_dir.db_path("AppData.db"),
            pool_size: 2,
            ..DatabaseConfig::default()
        },
        photos: PhotoConfig { directory: temp_dir.path().join("ProfileImages") },
        ..Config::default()
    }
}

/// Fresh context over an empty database. Keep the `TempDir` alive for as
/// long as the context is used.
pub async fn setup_test_context() -> (AppContext, TempDir) {
    let temp_dir = TempDir::new("app-command-tests").expect("failed to create temporary directory");
    let ctx = AppContext::new_with_config(test_config(&temp_dir))
        .await
        .expect("context should initialise");
    (ctx, temp_dir)
}
