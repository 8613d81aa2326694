//! Errors that end the interactive session.
//!
//! Store errors the user can act on (blank title, unknown title) never get
//! this far; the menu reports them and keeps going. What remains is either a
//! broken console or a store failure mid-operation.

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input reached end of file while a prompt was waiting.
    #[error("Input closed")]
    InputClosed,

    #[error("Store operation '{operation}' failed: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: DbError,
    },
}

impl MenuError {
    pub fn store(operation: &'static str, source: DbError) -> Self {
        MenuError::Store { operation, source }
    }

    /// The store operation that failed, if this came from the store.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            MenuError::Store { operation, .. } => Some(*operation),
            MenuError::Io(_) | MenuError::InputClosed => None,
        }
    }
}
