//! Versioned schema migrations for the SQLite store
//!
//! Each step runs in its own transaction together with the `schema_version`
//! row that records it, so a failed step leaves the database at the previous
//! version. Steps inspect the live schema before changing it: a database
//! created by the single-profile release has `Profiles`/`Sections` tables but
//! no `schema_version`, and step 1 must leave those tables alone for step 2
//! to upgrade.

use std::collections::BTreeSet;

use chrono::Utc;
use profilebox_domain::constants::LEGACY_PROFILE_KEY;
use profilebox_domain::{ProfileBoxError, Result};
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info, warn};

use crate::errors::map_sql_error;

/// One entry of the migration plan shared by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStep {
    pub version: i64,
    pub description: &'static str,
}

/// Ordered migration plan
pub const MIGRATION_PLAN: [MigrationStep; 2] = [
    MigrationStep { version: 1, description: "create_profile_tables" },
    MigrationStep { version: 2, description: "multi_profile_keys" },
];

const CREATE_VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    description TEXT NOT NULL,
    applied_at INTEGER NOT NULL
)";

const PROFILES_DDL: &str = "(
    Username TEXT NOT NULL,
    ProfileKey TEXT NOT NULL,
    DisplayName TEXT,
    Brief TEXT,
    PhotoPath TEXT,
    PRIMARY KEY (Username, ProfileKey)
)";

const SECTIONS_DDL: &str = "(
    Username TEXT NOT NULL,
    ProfileKey TEXT NOT NULL,
    Section TEXT NOT NULL,
    Body TEXT,
    UpdatedAt TEXT,
    PRIMARY KEY (Username, ProfileKey, Section)
)";

/// Apply all pending steps in order. Returns the versions applied.
pub fn run_migrations(conn: &mut Connection) -> Result<Vec<i64>> {
    conn.execute(CREATE_VERSION_TABLE, []).map_err(map_sql_error)?;
    let applied = applied_versions(conn)?;

    let mut newly_applied = Vec::new();
    for step in MIGRATION_PLAN.iter().filter(|s| !applied.contains(&s.version)) {
        let tx = conn.transaction().map_err(map_sql_error)?;
        apply_step(&tx, step).map_err(|e| {
            warn!(version = step.version, error = %e, "migration step failed");
            ProfileBoxError::Migration(format!(
                "step {} ({}) failed: {e}",
                step.version, step.description
            ))
        })?;
        tx.execute(
            "INSERT INTO schema_version (version, description, applied_at) VALUES (?1, ?2, ?3)",
            params![step.version, step.description, Utc::now().timestamp()],
        )
        .map_err(map_sql_error)?;
        tx.commit().map_err(map_sql_error)?;

        info!(version = step.version, description = step.description, "migration applied");
        newly_applied.push(step.version);
    }

    if newly_applied.is_empty() {
        debug!("schema already current");
    }
    Ok(newly_applied)
}

/// Highest recorded version, `None` when `schema_version` is missing or empty.
pub fn current_version(conn: &Connection) -> Result<Option<i64>> {
    if !table_exists(conn, "schema_version").map_err(map_sql_error)? {
        return Ok(None);
    }
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .map_err(map_sql_error)
}

fn applied_versions(conn: &Connection) -> Result<BTreeSet<i64>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_version").map_err(map_sql_error)?;
    let versions = stmt
        .query_map([], |row| row.get(0))
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<BTreeSet<i64>>>()
        .map_err(map_sql_error)?;
    Ok(versions)
}

fn apply_step(tx: &Transaction<'_>, step: &MigrationStep) -> Result<()> {
    match step.version {
        1 => create_profile_tables(tx).map_err(map_sql_error),
        2 => multi_profile_keys(tx),
        other => Err(ProfileBoxError::Migration(format!("unknown migration version {other}"))),
    }
}

fn create_profile_tables(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS Profiles {PROFILES_DDL};
         CREATE TABLE IF NOT EXISTS Sections {SECTIONS_DDL};"
    ))
}

/// Rewrite single-profile tables into the keyed shape. Existing rows land in
/// the first box. Tables that already carry `ProfileKey` are left untouched,
/// so a half-upgraded database only has its remaining table rewritten.
fn multi_profile_keys(tx: &Transaction<'_>) -> Result<()> {
    let profile_columns = table_columns(tx, "Profiles").map_err(map_sql_error)?;
    if !has_column(&profile_columns, "ProfileKey") {
        require_column(&profile_columns, "Profiles", "Username")?;
        let copy = |column: &str| {
            if has_column(&profile_columns, column) { column.to_string() } else { "NULL".into() }
        };
        let (display_name, brief, photo_path) =
            (copy("DisplayName"), copy("Brief"), copy("PhotoPath"));

        info!("upgrading legacy Profiles table");
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS Profiles_new;
             CREATE TABLE Profiles_new {PROFILES_DDL};
             INSERT INTO Profiles_new (Username, ProfileKey, DisplayName, Brief, PhotoPath)
                 SELECT Username, '{LEGACY_PROFILE_KEY}', {display_name}, {brief}, {photo_path}
                 FROM Profiles WHERE Username IS NOT NULL;
             DROP TABLE Profiles;
             ALTER TABLE Profiles_new RENAME TO Profiles;"
        ))
        .map_err(map_sql_error)?;
    }

    let section_columns = table_columns(tx, "Sections").map_err(map_sql_error)?;
    if !has_column(&section_columns, "ProfileKey") {
        require_column(&section_columns, "Sections", "Username")?;
        require_column(&section_columns, "Sections", "Section")?;
        let copy = |column: &str| {
            if has_column(&section_columns, column) { column.to_string() } else { "NULL".into() }
        };
        let (body, updated_at) = (copy("Body"), copy("UpdatedAt"));

        info!("upgrading legacy Sections table");
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS Sections_new;
             CREATE TABLE Sections_new {SECTIONS_DDL};
             INSERT INTO Sections_new (Username, ProfileKey, Section, Body, UpdatedAt)
                 SELECT Username, '{LEGACY_PROFILE_KEY}', Section, {body}, {updated_at}
                 FROM Sections WHERE Username IS NOT NULL AND Section IS NOT NULL;
             DROP TABLE Sections;
             ALTER TABLE Sections_new RENAME TO Sections;"
        ))
        .map_err(map_sql_error)?;
    }

    Ok(())
}

/// SQLite identifiers are case-insensitive, so `username` satisfies `Username`.
fn has_column(columns: &BTreeSet<String>, column: &str) -> bool {
    columns.iter().any(|name| name.eq_ignore_ascii_case(column))
}

fn require_column(columns: &BTreeSet<String>, table: &str, column: &str) -> Result<()> {
    if has_column(columns, column) {
        Ok(())
    } else {
        Err(ProfileBoxError::Migration(format!(
            "legacy {table} table has no {column} column"
        )))
    }
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
}

/// Column names of `table`; empty when the table does not exist.
pub(crate) fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<BTreeSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt.query_map(params![table], |row| row.get(0))?.collect();
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn fresh_database_gets_both_steps() {
        let mut conn = memory_db();
        assert_eq!(run_migrations(&mut conn).unwrap(), vec![1, 2]);
        assert_eq!(current_version(&conn).unwrap(), Some(2));

        let columns = table_columns(&conn, "Sections").unwrap();
        assert!(columns.contains("ProfileKey"));
        assert!(columns.contains("UpdatedAt"));
    }

    #[test]
    fn second_run_is_a_noop() {
        let mut conn = memory_db();
        run_migrations(&mut conn).unwrap();
        assert!(run_migrations(&mut conn).unwrap().is_empty());

        let rows: i64 =
            conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn legacy_tables_without_display_name_are_upgraded() {
        let mut conn = memory_db();
        conn.execute_batch(
            "CREATE TABLE Profiles (Username TEXT PRIMARY KEY, Brief TEXT, PhotoPath TEXT);
             CREATE TABLE Sections (Username TEXT, Section TEXT, Body TEXT, UpdatedAt TEXT,
                                    PRIMARY KEY (Username, Section));
             INSERT INTO Profiles VALUES ('bob', 'X', NULL);
             INSERT INTO Sections VALUES ('bob', 'Skills', 'Rust', '2024-01-01T00:00:00Z');",
        )
        .unwrap();

        run_migrations(&mut conn).unwrap();

        let (key, name, brief): (String, Option<String>, String) = conn
            .query_row(
                "SELECT ProfileKey, DisplayName, Brief FROM Profiles WHERE Username = 'bob'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(key, "Box1");
        assert_eq!(name, None);
        assert_eq!(brief, "X");

        let body: String = conn
            .query_row(
                "SELECT Body FROM Sections WHERE Username = 'bob' AND ProfileKey = 'Box1' \
                 AND Section = 'Skills'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(body, "Rust");
    }

    #[test]
    fn half_upgraded_database_only_rewrites_remaining_table() {
        let mut conn = memory_db();
        conn.execute_batch(&format!(
            "CREATE TABLE Profiles {PROFILES_DDL};
             INSERT INTO Profiles VALUES ('amy', 'Box3', 'Amy', 'kept', NULL);
             CREATE TABLE Sections (Username TEXT, Section TEXT, Body TEXT, UpdatedAt TEXT);
             INSERT INTO Sections VALUES ('amy', 'Hobbies', 'chess', NULL);"
        ))
        .unwrap();

        run_migrations(&mut conn).unwrap();

        let key: String = conn
            .query_row("SELECT ProfileKey FROM Profiles WHERE Username = 'amy'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(key, "Box3");

        let key: String = conn
            .query_row("SELECT ProfileKey FROM Sections WHERE Username = 'amy'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(key, "Box1");
    }

    #[test]
    fn lower_case_legacy_columns_are_recognised() {
        let mut conn = memory_db();
        conn.execute_batch(
            "CREATE TABLE Profiles (username TEXT PRIMARY KEY, brief TEXT, photopath TEXT);
             CREATE TABLE Sections (username TEXT, section TEXT, body TEXT, updatedat TEXT);
             INSERT INTO Profiles VALUES ('bob', 'X', 'bob.png');
             INSERT INTO Sections VALUES ('bob', 'Skills', 'SQL', NULL);",
        )
        .unwrap();

        assert_eq!(run_migrations(&mut conn).unwrap(), vec![1, 2]);

        let (key, brief, photo): (String, String, String) = conn
            .query_row(
                "SELECT ProfileKey, Brief, PhotoPath FROM Profiles WHERE Username = 'bob'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!((key.as_str(), brief.as_str(), photo.as_str()), ("Box1", "X", "bob.png"));

        let body: String = conn
            .query_row(
                "SELECT Body FROM Sections WHERE ProfileKey = 'Box1' AND Section = 'Skills'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(body, "SQL");
    }

    #[test]
    fn unusable_legacy_table_rolls_back() {
        let mut conn = memory_db();
        conn.execute_batch("CREATE TABLE Profiles (Nickname TEXT, Brief TEXT);").unwrap();

        let err = run_migrations(&mut conn).unwrap_err();
        assert!(matches!(err, ProfileBoxError::Migration(ref m) if m.contains("Username")));

        // Step 1 committed on its own; step 2 left no trace.
        assert_eq!(current_version(&conn).unwrap(), Some(1));
        assert!(table_columns(&conn, "Profiles").unwrap().contains("Nickname"));
    }
}
