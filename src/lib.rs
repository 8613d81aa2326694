//! Menu-driven to-do list backed by a local SQLite file.
//!
//! `db` owns the table and every read/write on it, `migrations` owns the
//! schema history, and `menu` turns typed choices into store calls through the
//! `console` boundary.

pub mod category;
pub mod console;
pub mod db;
pub mod error;
pub mod menu;
pub mod migrations;
pub mod state;
pub mod types;

use log::LevelFilter;

/// Send log output to stderr at `level`, unless `RUST_LOG` says otherwise.
///
/// Unknown level names fall back to `warn`.
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
}
