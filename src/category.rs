//! To-do categories.
//!
//! The six well-known categories get their own variants. Anything else a user
//! types is kept verbatim in `Other` so the stored text round-trips exactly;
//! lookups by category are case-sensitive string matches against that text.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    Urgent,
    Schedule,
    Delegate,
    Automate,
    Eliminate,
    #[default]
    Uncategorized,
    Other(String),
}

impl Category {
    /// The well-known categories, in menu order.
    pub const KNOWN: [Category; 6] = [
        Category::Urgent,
        Category::Schedule,
        Category::Delegate,
        Category::Automate,
        Category::Eliminate,
        Category::Uncategorized,
    ];

    /// String label for SQL storage.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Urgent => "urgent",
            Category::Schedule => "schedule",
            Category::Delegate => "delegate",
            Category::Automate => "automate",
            Category::Eliminate => "eliminate",
            Category::Uncategorized => "uncategorized",
            Category::Other(raw) => raw,
        }
    }

    /// Parse from SQL string. Exact match only: `"Urgent"` is `Other`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "urgent" => Category::Urgent,
            "schedule" => Category::Schedule,
            "delegate" => Category::Delegate,
            "automate" => Category::Automate,
            "eliminate" => Category::Eliminate,
            "uncategorized" => Category::Uncategorized,
            other => Category::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
