use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of `~/.todo-cli/config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Database file to open instead of `~/.todo-cli/todo.db`.
    #[serde(default, alias = "db_path", skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}
