//! Shared type definitions for the database layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    /// The database file or its directory could not be created or opened.
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Schema migration failed: {0}")]
    Migration(String),

    /// The one-time scheduling migration found columns it was meant to add.
    #[error("Scheduling columns already exist: {}", .columns.join(", "))]
    SchemaMigrationConflict { columns: Vec<String> },

    #[error("Title cannot be empty")]
    TitleEmpty,

    #[error("No to-do item found with title '{title}'")]
    NotFound { title: String },
}

impl DbError {
    /// True for errors the menu reports and then carries on from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DbError::TitleEmpty | DbError::NotFound { .. })
    }
}

/// A row from the `todo_items` table.
///
/// The scheduling fields are opaque text. They are only ever populated for
/// items in the `schedule` category, and nothing parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub completed: bool,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

impl TodoItem {
    /// A fresh, not-yet-completed item with no scheduling window.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            category,
            completed: false,
            start_date: None,
            start_time: None,
            end_date: None,
            end_time: None,
        }
    }
}

/// Start/end window written by `update_schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleWindow {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

/// Outcome of a successful `remove_by_title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub count: usize,
}
