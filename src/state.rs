//! Configuration loading and database path resolution.

use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{TodoDb, APP_DIR_NAME};
use crate::types::Config;

const CONFIG_FILE_NAME: &str = "config.json";

/// Path of the optional config file: `~/.todo-cli/config.json`.
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config file from its default location.
///
/// A missing file yields the default config. A file that exists but cannot be
/// read or parsed is an error.
pub fn load_config() -> Result<Config, String> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))
}

/// Pick the database path: explicit override, then config, then the default.
pub fn resolve_db_path(cli_override: Option<PathBuf>, config: &Config) -> Result<PathBuf, String> {
    if let Some(path) = cli_override {
        return Ok(path);
    }
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }
    TodoDb::default_path().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_reads_db_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "dbPath": "/tmp/elsewhere/todo.db" }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/elsewhere/todo.db")));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"), "{err}");
    }

    #[test]
    fn test_resolution_order() {
        let config = Config {
            db_path: Some(PathBuf::from("from-config.db")),
        };

        let chosen = resolve_db_path(Some(PathBuf::from("from-cli.db")), &config).unwrap();
        assert_eq!(chosen, PathBuf::from("from-cli.db"));

        let chosen = resolve_db_path(None, &config).unwrap();
        assert_eq!(chosen, PathBuf::from("from-config.db"));
    }
}
