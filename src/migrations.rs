//! Schema migration framework.
//!
//! Numbered migrations are applied in order, each exactly once, tracked by the
//! `schema_version` table.
//!
//! Databases created by earlier releases of the app have a `todo_items` table
//! but no `schema_version` rows. The bootstrap step detects them and marks the
//! migrations whose effects are already present, so nothing is re-run against
//! a populated table.

use rusqlite::{params, Connection};

/// The items table, as created on a fresh database.
///
/// `id` aliases SQLite's rowid. Tables created before the surrogate key existed
/// still have an implicit rowid, so every list query orders by `rowid`.
const BASELINE_SQL: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT,
    completed INTEGER
);";

/// Columns added by the scheduling migration, all nullable text.
pub const SCHEDULING_COLUMNS: [&str; 4] = ["start_date", "start_time", "end_date", "end_time"];

pub const BASELINE_VERSION: i32 = 1;
pub const SCHEDULING_VERSION: i32 = 2;

struct Migration {
    version: i32,
    name: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: BASELINE_VERSION,
        name: "baseline",
        apply: ensure_items_table,
    },
    Migration {
        version: SCHEDULING_VERSION,
        name: "scheduling columns",
        apply: ensure_scheduling_columns,
    },
];

/// Create `todo_items` if it doesn't exist. Safe to call on every startup.
pub(crate) fn ensure_items_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(BASELINE_SQL)
}

/// Add whichever scheduling columns are missing.
pub(crate) fn ensure_scheduling_columns(conn: &Connection) -> rusqlite::Result<()> {
    for column in SCHEDULING_COLUMNS {
        add_column_if_missing(conn, "todo_items", column, "TEXT")?;
    }
    Ok(())
}

/// Column names of `table`, in declaration order. Empty if the table is absent.
pub(crate) fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let columns = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// `ALTER TABLE .. ADD COLUMN` unless the column is already there.
///
/// Returns whether the column was added.
pub(crate) fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> rusqlite::Result<bool> {
    if table_columns(conn, table)?.iter().any(|c| c == column) {
        return Ok(false);
    }
    conn.execute(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl}"), [])?;
    Ok(true)
}

/// Create the `schema_version` table if it doesn't exist.
fn ensure_schema_version_table(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(|e| format!("Failed to create schema_version table: {}", e))
}

/// Return the highest applied migration version, or 0 if none.
pub(crate) fn current_version(conn: &Connection) -> Result<i32, String> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| format!("Failed to read schema version: {}", e))
}

/// Mark `version` as applied. No-op if it already is.
pub(crate) fn record_version(conn: &Connection, version: i32) -> Result<(), String> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![version],
    )
    .map_err(|e| format!("Failed to record migration v{}: {}", version, e))?;
    Ok(())
}

fn items_table_exists(conn: &Connection) -> Result<bool, String> {
    conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todo_items'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(|e| format!("Failed to inspect sqlite_master: {}", e))
}

/// Detect a database from before versioning and mark what it already has.
///
/// Returns the version the database was bootstrapped to (0 if untouched).
fn bootstrap_existing_db(conn: &Connection) -> Result<i32, String> {
    if current_version(conn)? > 0 || !items_table_exists(conn)? {
        return Ok(0);
    }

    record_version(conn, BASELINE_VERSION)?;
    let mut version = BASELINE_VERSION;

    let columns = table_columns(conn, "todo_items")
        .map_err(|e| format!("Failed to read todo_items columns: {}", e))?;
    if SCHEDULING_COLUMNS
        .iter()
        .all(|wanted| columns.iter().any(|c| c == wanted))
    {
        record_version(conn, SCHEDULING_VERSION)?;
        version = SCHEDULING_VERSION;
    }

    log::info!(
        "Migration bootstrap: marked existing database at v{}",
        version
    );
    Ok(version)
}

/// Back up the database before applying migrations.
///
/// Uses SQLite's online backup API to create a hot copy at
/// `<db_path>.pre-migration.bak`. Only called when there are pending
/// migrations and an items table worth protecting.
fn backup_before_migration(conn: &Connection) -> Result<(), String> {
    let db_path: String = conn
        .query_row("PRAGMA database_list", [], |row| row.get(2))
        .map_err(|e| format!("Failed to get database path: {}", e))?;

    if db_path.is_empty() || db_path == ":memory:" {
        return Ok(());
    }

    let backup_path = format!("{}.pre-migration.bak", db_path);
    let mut backup_conn = Connection::open(&backup_path)
        .map_err(|e| format!("Failed to open backup file: {}", e))?;

    let backup = rusqlite::backup::Backup::new(conn, &mut backup_conn)
        .map_err(|e| format!("Failed to initialize pre-migration backup: {}", e))?;

    backup
        .step(-1)
        .map_err(|e| format!("Pre-migration backup failed: {}", e))?;

    log::info!("Pre-migration backup created at {}", backup_path);
    Ok(())
}

/// Run all pending migrations.
///
/// Returns the number of migrations applied (0 if already up-to-date).
pub fn run_migrations(conn: &Connection) -> Result<usize, String> {
    let max_known = MIGRATIONS.last().map(|m| m.version).unwrap_or(0);
    run_migrations_to(conn, max_known)
}

/// Run pending migrations up to and including `target`.
///
/// Forward-compat guard: if the database has a higher version than the highest
/// known migration, returns an error telling the user to upgrade.
pub fn run_migrations_to(conn: &Connection, target: i32) -> Result<usize, String> {
    ensure_schema_version_table(conn)?;
    bootstrap_existing_db(conn)?;

    let current = current_version(conn)?;
    let max_known = MIGRATIONS.last().map(|m| m.version).unwrap_or(0);

    if current > max_known {
        return Err(format!(
            "Database schema version ({}) is newer than this version of the to-do app supports ({}). \
             Please upgrade the to-do app.",
            current, max_known
        ));
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| m.version > current && m.version <= target)
        .collect();

    if pending.is_empty() {
        return Ok(0);
    }

    if items_table_exists(conn)? {
        backup_before_migration(conn)?;
    }

    for migration in &pending {
        (migration.apply)(conn).map_err(|e| {
            format!(
                "Migration v{} ({}) failed: {}",
                migration.version, migration.name, e
            )
        })?;
        record_version(conn, migration.version)?;

        log::info!(
            "Applied migration v{} ({})",
            migration.version,
            migration.name
        );
    }

    Ok(pending.len())
}
