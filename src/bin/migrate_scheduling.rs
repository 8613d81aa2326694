//! `todo-migrate`: one-time scheduling-column migration.
//!
//! Adds `start_date`, `start_time`, `end_date` and `end_time` to `todo_items`.
//! Run it once against a database created by a release that predates
//! scheduling. A second run fails with a conflict and changes nothing; the
//! interactive app does not need it, since it adds missing columns itself.
//! A path with no database behind it is refused rather than created.
//!
//! Usage: `todo-migrate [--db PATH]`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use todo_lib::db::{DbError, TodoDb};
use todo_lib::state::{load_config, resolve_db_path};

#[derive(Parser, Debug)]
#[clap(
    name = "todo-migrate",
    author,
    version,
    about = "Add the scheduling columns to an existing to-do database"
)]
struct Cli {
    #[clap(long, env = "TODO_DB", help = "Database file to migrate")]
    db: Option<PathBuf>,

    #[clap(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    todo_lib::init_logging(&cli.log_level);

    let config = load_config().map_err(anyhow::Error::msg)?;
    let path = resolve_db_path(cli.db, &config).map_err(anyhow::Error::msg)?;

    require_existing(&path)?;

    let db = TodoDb::open_baseline_at(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    match db.migrate_add_scheduling() {
        Ok(()) => {}
        Err(err @ DbError::SchemaMigrationConflict { .. }) => {
            return Err(err).context(format!(
                "{} has already been migrated; nothing was changed",
                path.display()
            ));
        }
        Err(err) => return Err(err).context("adding scheduling columns"),
    }

    db.close().context("closing database")?;
    println!("\nDB UPDATED.");
    Ok(())
}

/// Only an existing database file can be migrated.
fn require_existing(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!(
            "no database at {}; run `todo` once to create one, or pass --db",
            path.display()
        );
    }
    Ok(())
}
