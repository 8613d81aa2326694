//! `todo`: interactive, menu-driven to-do list.
//!
//! Starts straight into the main menu. Every flag is optional; the database
//! path falls back to the config file and then to `~/.todo-cli/todo.db`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use todo_lib::console::StdConsole;
use todo_lib::db::TodoDb;
use todo_lib::menu::Dispatcher;
use todo_lib::state::{load_config, resolve_db_path};

#[derive(Parser, Debug)]
#[clap(name = "todo", author, version, about = "Menu-driven to-do list manager")]
struct Cli {
    #[clap(long, env = "TODO_DB", help = "Database file to use")]
    db: Option<PathBuf>,

    #[clap(
        long,
        default_value = "warn",
        help = "Log level for stderr diagnostics (error, warn, info, debug, trace)"
    )]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    todo_lib::init_logging(&cli.log_level);

    let config = load_config()
        .map_err(anyhow::Error::msg)
        .context("loading configuration")?;
    let path = resolve_db_path(cli.db, &config)
        .map_err(anyhow::Error::msg)
        .context("resolving database path")?;

    let db = TodoDb::open_at(&path)
        .with_context(|| format!("opening to-do store at {}", path.display()))?;
    log::info!("Using database {}", db.path().display());

    let mut console = StdConsole::stdio();
    Dispatcher::new(&db, &mut console)
        .run()
        .context("to-do session ended abnormally")?;

    db.close().context("closing to-do store")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert!(cli.db.is_none() || std::env::var_os("TODO_DB").is_some());
    }

    #[test]
    fn test_cli_db_flag() {
        let cli = Cli::try_parse_from(["todo", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
