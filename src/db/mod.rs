//! SQLite-backed store for to-do items.
//!
//! The database lives at `~/.todo-cli/todo.db` unless the configuration says
//! otherwise. `TodoDb` owns the only connection: it is opened once at startup,
//! handed to the menu by reference, and closed once when the user quits.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::migrations;

pub mod items;
pub mod types;
pub use types::*;

/// Directory under the home directory that holds the database and config.
pub const APP_DIR_NAME: &str = ".todo-cli";
const DB_FILE_NAME: &str = "todo.db";

#[derive(Debug)]
pub struct TodoDb {
    conn: Connection,
    path: PathBuf,
}

impl TodoDb {
    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (or create) the database at `path` and bring the schema up to date.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();
        let conn = Self::connect(&path)?;

        let applied = migrations::run_migrations(&conn).map_err(DbError::Migration)?;
        if applied > 0 {
            log::info!("Applied {} migration(s) to {}", applied, path.display());
        }

        Ok(Self { conn, path })
    }

    /// Open the database with only the baseline table in place.
    ///
    /// Used by the one-time scheduling migration utility, which needs to see
    /// the table before the scheduling columns are added.
    pub fn open_baseline_at(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();
        let conn = Self::connect(&path)?;
        migrations::run_migrations_to(&conn, migrations::BASELINE_VERSION)
            .map_err(DbError::Migration)?;
        Ok(Self { conn, path })
    }

    /// Resolve the default database path: `~/.todo-cli/todo.db`.
    pub fn default_path() -> Result<PathBuf, DbError> {
        let home = dirs::home_dir().ok_or(DbError::HomeDirNotFound)?;
        Ok(home.join(APP_DIR_NAME).join(DB_FILE_NAME))
    }

    /// Create the items table if absent. Idempotent.
    pub fn ensure_schema(&self) -> Result<(), DbError> {
        migrations::ensure_items_table(&self.conn)?;
        Ok(())
    }

    /// Add the four scheduling columns, exactly once.
    ///
    /// Fails with `SchemaMigrationConflict` without altering anything if any
    /// of the columns already exists. Startup uses the idempotent variant in
    /// `migrations`; this is the strict form behind `todo-migrate`.
    pub fn migrate_add_scheduling(&self) -> Result<(), DbError> {
        let existing = migrations::table_columns(&self.conn, "todo_items")?;
        let conflicts: Vec<String> = migrations::SCHEDULING_COLUMNS
            .iter()
            .filter(|column| existing.iter().any(|c| c == *column))
            .map(|column| column.to_string())
            .collect();
        if !conflicts.is_empty() {
            return Err(DbError::SchemaMigrationConflict { columns: conflicts });
        }

        let tx = self.conn.unchecked_transaction()?;
        for column in migrations::SCHEDULING_COLUMNS {
            tx.execute(
                &format!("ALTER TABLE todo_items ADD COLUMN {column} TEXT"),
                [],
            )?;
        }
        migrations::record_version(&tx, migrations::SCHEDULING_VERSION)
            .map_err(DbError::Migration)?;
        tx.commit()?;

        log::info!("Added scheduling columns to {}", self.path.display());
        Ok(())
    }

    /// Release the connection.
    pub fn close(self) -> Result<(), DbError> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))?;
        log::debug!("Closed {}", path.display());
        Ok(())
    }

    fn connect(path: &Path) -> Result<Connection, DbError> {
        let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| {
            DbError::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| unavailable(e.into()))?;
            }
        }

        let conn = Connection::open(path).map_err(|e| unavailable(e.into()))?;

        // First real read of the file; a corrupt or foreign file fails here.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| unavailable(e.into()))?;

        log::debug!("Opened {}", path.display());
        Ok(conn)
    }
}

// =============================================================================
// Shared test utilities
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
