//! Schema migrations for the PostgreSQL store
//!
//! Follows the same plan as the SQLite store. Legacy tables are upgraded in
//! place with `ALTER TABLE` since PostgreSQL can swap a primary key without
//! rebuilding the table.

use std::collections::BTreeSet;

use chrono::Utc;
use profilebox_domain::constants::LEGACY_PROFILE_KEY;
use profilebox_domain::{ProfileBoxError, Result};
use tokio_postgres::{Client, GenericClient, Transaction};
use tracing::{info, warn};

use crate::database::migrations::{MigrationStep, MIGRATION_PLAN};
use crate::errors::map_pg_error;

const CREATE_VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    version BIGINT PRIMARY KEY,
    description TEXT NOT NULL,
    applied_at BIGINT NOT NULL
)";

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS profiles (
    username TEXT NOT NULL,
    profile_key TEXT NOT NULL,
    display_name TEXT,
    brief TEXT,
    photo_path TEXT,
    PRIMARY KEY (username, profile_key)
);
CREATE TABLE IF NOT EXISTS sections (
    username TEXT NOT NULL,
    profile_key TEXT NOT NULL,
    section TEXT NOT NULL,
    body TEXT,
    updated_at TIMESTAMPTZ,
    PRIMARY KEY (username, profile_key, section)
);";

/// Keyed tables: name, identity columns, nullable data columns.
const KEYED_TABLES: [(&str, &[&str], &[(&str, &str)]); 2] = [
    (
        "profiles",
        &["username"],
        &[("display_name", "TEXT"), ("brief", "TEXT"), ("photo_path", "TEXT")],
    ),
    ("sections", &["username", "section"], &[("body", "TEXT"), ("updated_at", "TIMESTAMPTZ")]),
];

/// Apply all pending steps in order. Returns the versions applied.
pub async fn run_migrations(client: &mut Client) -> Result<Vec<i64>> {
    client.batch_execute(CREATE_VERSION_TABLE).await.map_err(map_pg_error)?;
    let applied: BTreeSet<i64> = client
        .query("SELECT version FROM schema_version", &[])
        .await
        .map_err(map_pg_error)?
        .iter()
        .map(|row| row.get(0))
        .collect();

    let mut newly_applied = Vec::new();
    for step in MIGRATION_PLAN.iter().filter(|s| !applied.contains(&s.version)) {
        let tx = client.transaction().await.map_err(map_pg_error)?;
        if let Err(e) = apply_step(&tx, step).await {
            warn!(version = step.version, error = %e, "migration step failed");
            return Err(ProfileBoxError::Migration(format!(
                "step {} ({}) failed: {e}",
                step.version, step.description
            )));
        }
        tx.execute(
            "INSERT INTO schema_version (version, description, applied_at) VALUES ($1, $2, $3)",
            &[&step.version, &step.description, &Utc::now().timestamp()],
        )
        .await
        .map_err(map_pg_error)?;
        tx.commit().await.map_err(map_pg_error)?;

        info!(version = step.version, description = step.description, "migration applied");
        newly_applied.push(step.version);
    }
    Ok(newly_applied)
}

/// Highest recorded version, `None` when `schema_version` is missing or empty.
pub async fn current_version(client: &Client) -> Result<Option<i64>> {
    let exists: bool = client
        .query_one("SELECT to_regclass('schema_version') IS NOT NULL", &[])
        .await
        .map_err(map_pg_error)?
        .get(0);
    if !exists {
        return Ok(None);
    }
    let row = client
        .query_one("SELECT MAX(version) FROM schema_version", &[])
        .await
        .map_err(map_pg_error)?;
    Ok(row.get(0))
}

async fn apply_step(tx: &Transaction<'_>, step: &MigrationStep) -> Result<()> {
    match step.version {
        1 => tx.batch_execute(CREATE_TABLES).await.map_err(map_pg_error),
        2 => multi_profile_keys(tx).await,
        other => Err(ProfileBoxError::Migration(format!("unknown migration version {other}"))),
    }
}

async fn multi_profile_keys(tx: &Transaction<'_>) -> Result<()> {
    for (table, identity, data_columns) in KEYED_TABLES {
        let columns = table_columns(tx, table).await?;
        if columns.contains("profile_key") {
            continue;
        }
        for column in identity {
            if !columns.contains(*column) {
                return Err(ProfileBoxError::Migration(format!(
                    "legacy {table} table has no {column} column"
                )));
            }
        }

        info!(table, "upgrading legacy table");
        let null_filter =
            identity.iter().map(|c| format!("{c} IS NULL")).collect::<Vec<_>>().join(" OR ");
        let key_columns = std::iter::once("username")
            .chain(std::iter::once("profile_key"))
            .chain(identity.iter().copied().filter(|c| *c != "username"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "DELETE FROM {table} WHERE {null_filter};
             ALTER TABLE {table} ADD COLUMN profile_key TEXT NOT NULL DEFAULT '{LEGACY_PROFILE_KEY}';"
        );
        if let Some(constraint) = primary_key_name(tx, table).await? {
            sql.push_str(&format!(
                "ALTER TABLE {table} DROP CONSTRAINT \"{}\";",
                constraint.replace('"', "\"\"")
            ));
        }
        sql.push_str(&format!(
            "ALTER TABLE {table} ADD PRIMARY KEY ({key_columns});
             ALTER TABLE {table} ALTER COLUMN profile_key DROP DEFAULT;"
        ));
        for (column, ty) in data_columns {
            sql.push_str(&format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {column} {ty};"));
        }
        tx.batch_execute(&sql).await.map_err(map_pg_error)?;
    }
    Ok(())
}

async fn table_columns<C: GenericClient>(client: &C, table: &str) -> Result<BTreeSet<String>> {
    let rows = client
        .query(
            "SELECT column_name::text FROM information_schema.columns
             WHERE table_schema = current_schema() AND table_name = $1",
            &[&table],
        )
        .await
        .map_err(map_pg_error)?;
    Ok(rows.iter().map(|row| row.get(0)).collect())
}

async fn primary_key_name<C: GenericClient>(client: &C, table: &str) -> Result<Option<String>> {
    let row = client
        .query_opt(
            "SELECT constraint_name::text FROM information_schema.table_constraints
             WHERE table_schema = current_schema() AND table_name = $1
               AND constraint_type = 'PRIMARY KEY'",
            &[&table],
        )
        .await
        .map_err(map_pg_error)?;
    Ok(row.map(|row| row.get(0)))
}
