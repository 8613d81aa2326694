use rusqlite::{params, OptionalExtension};

use super::*;
use crate::category::Category;
use crate::migrations;

/// Column list shared by every item query, in `map_item_row` order.
const ITEM_COLUMNS: &str = "title, description, category, completed,
                            start_date, start_time, end_date, end_time";

/// Same shape as `ITEM_COLUMNS` for a table without the scheduling columns.
const BASELINE_ITEM_COLUMNS: &str = "title, description, category, completed,
                                     NULL, NULL, NULL, NULL";

impl TodoDb {
    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new item.
    ///
    /// Rejects blank titles with `TitleEmpty` before touching the table.
    /// Scheduling fields are written as given (normally all `None`) when the
    /// table has the scheduling columns, and dropped when it does not.
    pub fn insert(&self, item: &TodoItem) -> Result<(), DbError> {
        if item.title.trim().is_empty() {
            return Err(DbError::TitleEmpty);
        }

        if !self.has_scheduling_columns()? {
            self.conn.execute(
                "INSERT INTO todo_items (title, description, category, completed)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    item.title,
                    item.description,
                    item.category.as_str(),
                    item.completed,
                ],
            )?;
            log::debug!("Inserted to-do item '{}' (no scheduling columns)", item.title);
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO todo_items (title, description, category, completed,
                                     start_date, start_time, end_date, end_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.title,
                item.description,
                item.category.as_str(),
                item.completed,
                item.start_date,
                item.start_time,
                item.end_date,
                item.end_time,
            ],
        )?;

        log::debug!("Inserted to-do item '{}'", item.title);
        Ok(())
    }

    /// Delete every item whose title matches exactly.
    pub fn remove_by_title(&self, title: &str) -> Result<Removed, DbError> {
        let count = self
            .conn
            .execute("DELETE FROM todo_items WHERE title = ?1", params![title])?;

        if count == 0 {
            return Err(DbError::NotFound {
                title: title.to_string(),
            });
        }

        log::debug!("Removed {} to-do item(s) titled '{}'", count, title);
        Ok(Removed { count })
    }

    /// Set the scheduling window on every item whose title matches exactly.
    pub fn update_schedule(&self, title: &str, window: &ScheduleWindow) -> Result<(), DbError> {
        if self.find_by_title(title)?.is_none() {
            return Err(DbError::NotFound {
                title: title.to_string(),
            });
        }

        let count = self.conn.execute(
            "UPDATE todo_items
             SET start_date = ?1, start_time = ?2, end_date = ?3, end_time = ?4
             WHERE title = ?5",
            params![
                window.start_date,
                window.start_time,
                window.end_date,
                window.end_time,
                title,
            ],
        )?;

        log::debug!("Scheduled {} to-do item(s) titled '{}'", count, title);
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All items, oldest first.
    pub fn list_all(&self) -> Result<Vec<TodoItem>, DbError> {
        let columns = self.item_columns()?;
        self.query_items(
            &format!("SELECT {columns} FROM todo_items ORDER BY rowid"),
            params![],
        )
    }

    /// Items whose stored category text equals `category` exactly.
    pub fn list_by_category(&self, category: &Category) -> Result<Vec<TodoItem>, DbError> {
        let columns = self.item_columns()?;
        self.query_items(
            &format!("SELECT {columns} FROM todo_items WHERE category = ?1 ORDER BY rowid"),
            params![category.as_str()],
        )
    }

    pub fn list_uncategorized(&self) -> Result<Vec<TodoItem>, DbError> {
        self.list_by_category(&Category::Uncategorized)
    }

    /// First item (by insertion order) whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> Result<Option<TodoItem>, DbError> {
        let columns = self.item_columns()?;
        let item = self
            .conn
            .query_row(
                &format!("SELECT {columns} FROM todo_items WHERE title = ?1 ORDER BY rowid LIMIT 1"),
                params![title],
                Self::map_item_row,
            )
            .optional()?;
        Ok(item)
    }

    pub fn count(&self) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM todo_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether all four scheduling columns are present. Baseline and legacy
    /// tables lack them until the scheduling migration has run.
    fn has_scheduling_columns(&self) -> Result<bool, DbError> {
        let existing = migrations::table_columns(&self.conn, "todo_items")?;
        Ok(migrations::SCHEDULING_COLUMNS
            .iter()
            .all(|column| existing.iter().any(|c| c == column)))
    }

    fn item_columns(&self) -> Result<&'static str, DbError> {
        if self.has_scheduling_columns()? {
            Ok(ITEM_COLUMNS)
        } else {
            Ok(BASELINE_ITEM_COLUMNS)
        }
    }

    fn query_items(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<TodoItem>, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::map_item_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Helper: map a row selected with `ITEM_COLUMNS` (or its baseline
    /// stand-in) into a `TodoItem`.
    ///
    /// Legacy rows may carry NULL in `category` and `completed`; those read as
    /// `uncategorized` and not completed.
    pub(crate) fn map_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TodoItem> {
        let category: Option<String> = row.get(2)?;
        let completed: Option<bool> = row.get(3)?;
        Ok(TodoItem {
            title: row.get(0)?,
            description: row.get(1)?,
            category: category
                .as_deref()
                .map(Category::from_str_lossy)
                .unwrap_or_default(),
            completed: completed.unwrap_or(false),
            start_date: row.get(4)?,
            start_time: row.get(5)?,
            end_date: row.get(6)?,
            end_time: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;

    fn item(title: &str, description: &str, category: Category) -> TodoItem {
        TodoItem::new(title, Some(description.to_string()), category)
    }

    fn window() -> ScheduleWindow {
        ScheduleWindow {
            start_date: "240101".to_string(),
            start_time: "09:00 AM".to_string(),
            end_date: "240102".to_string(),
            end_time: "05:00 PM".to_string(),
        }
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let db = test_db();
        let original = item("Write report", "Q3 summary", Category::Urgent);
        db.insert(&original).expect("insert should succeed");

        let items = db.list_all().unwrap();
        assert_eq!(items, vec![original]);
        assert!(!items[0].completed);
        assert!(items[0].start_date.is_none());
        assert!(items[0].end_time.is_none());
    }

    #[test]
    fn test_insert_blank_title_rejected() {
        let db = test_db();
        db.insert(&item("Existing", "", Category::Urgent)).unwrap();

        for title in ["", "   ", "\t\n"] {
            let err = db
                .insert(&item(title, "ignored", Category::Urgent))
                .unwrap_err();
            assert!(matches!(err, DbError::TitleEmpty));
            assert!(err.is_recoverable());
        }
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_list_all_preserves_insertion_order() {
        let db = test_db();
        for title in ["first", "second", "third"] {
            db.insert(&item(title, "", Category::Delegate)).unwrap();
        }
        db.remove_by_title("second").unwrap();
        db.insert(&item("fourth", "", Category::Delegate)).unwrap();

        let titles: Vec<String> = db.list_all().unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["first", "third", "fourth"]);
    }

    #[test]
    fn test_category_filters() {
        let db = test_db();
        db.insert(&item("Loose end", "", Category::Uncategorized))
            .unwrap();
        db.insert(&item("Fire", "", Category::Urgent)).unwrap();

        let uncategorized = db.list_uncategorized().unwrap();
        assert_eq!(uncategorized.len(), 1);
        assert_eq!(uncategorized[0].title, "Loose end");

        let urgent = db.list_by_category(&Category::Urgent).unwrap();
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].title, "Fire");
    }

    #[test]
    fn test_category_match_is_verbatim() {
        let db = test_db();
        db.insert(&item("Shouting", "", Category::from_str_lossy("URGENT")))
            .unwrap();
        db.insert(&item("Someday", "", Category::from_str_lossy("someday")))
            .unwrap();

        assert!(db.list_by_category(&Category::Urgent).unwrap().is_empty());
        let shouting = db
            .list_by_category(&Category::Other("URGENT".to_string()))
            .unwrap();
        assert_eq!(shouting.len(), 1);

        let someday = db.find_by_title("Someday").unwrap().unwrap();
        assert_eq!(someday.category.as_str(), "someday");
    }

    #[test]
    fn test_find_by_title_exact_and_first() {
        let db = test_db();
        db.insert(&item("Dup", "one", Category::Urgent)).unwrap();
        db.insert(&item("Dup", "two", Category::Urgent)).unwrap();

        let found = db.find_by_title("Dup").unwrap().unwrap();
        assert_eq!(found.description.as_deref(), Some("one"));
        assert!(db.find_by_title("dup").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_reports_not_found() {
        let db = test_db();
        db.insert(&item("Keep", "", Category::Urgent)).unwrap();

        let err = db.remove_by_title("Nope").unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref title } if title == "Nope"));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_remove_deletes_all_matches() {
        let db = test_db();
        db.insert(&item("Dup", "one", Category::Urgent)).unwrap();
        db.insert(&item("Dup", "two", Category::Eliminate)).unwrap();
        db.insert(&item("Other", "", Category::Urgent)).unwrap();

        let removed = db.remove_by_title("Dup").unwrap();
        assert_eq!(removed, Removed { count: 2 });
        assert!(db.find_by_title("Dup").unwrap().is_none());
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_update_schedule_sets_fields_verbatim() {
        let db = test_db();
        let original = item("Plan offsite", "book venue", Category::Schedule);
        db.insert(&original).unwrap();

        db.update_schedule("Plan offsite", &window()).unwrap();

        let updated = db.find_by_title("Plan offsite").unwrap().unwrap();
        assert_eq!(updated.start_date.as_deref(), Some("240101"));
        assert_eq!(updated.start_time.as_deref(), Some("09:00 AM"));
        assert_eq!(updated.end_date.as_deref(), Some("240102"));
        assert_eq!(updated.end_time.as_deref(), Some("05:00 PM"));

        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.completed, original.completed);
    }

    #[test]
    fn test_update_schedule_missing_title() {
        let db = test_db();
        let err = db.update_schedule("Ghost", &window()).unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_legacy_nulls_read_as_defaults() {
        let db = test_db();
        db.conn_ref()
            .execute(
                "INSERT INTO todo_items (title, description, category, completed)
                 VALUES ('Bare', NULL, NULL, NULL)",
                [],
            )
            .unwrap();

        let bare = db.find_by_title("Bare").unwrap().unwrap();
        assert_eq!(bare.category, Category::Uncategorized);
        assert!(!bare.completed);
        assert!(bare.description.is_none());
    }

    #[test]
    fn test_baseline_table_supports_add_list_remove() {
        let dir = tempfile::tempdir().unwrap();
        let db = TodoDb::open_baseline_at(dir.path().join("todo.db")).unwrap();

        db.insert(&item("Old style", "no schedule yet", Category::Schedule))
            .expect("insert without scheduling columns");
        db.insert(&item("Another", "", Category::Urgent)).unwrap();

        let items = db.list_all().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Old style");
        assert!(items[0].start_date.is_none());
        assert_eq!(db.list_by_category(&Category::Schedule).unwrap().len(), 1);
        assert!(db.find_by_title("Another").unwrap().is_some());

        db.remove_by_title("Another").unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_end_to_end_add_list_remove() {
        let db = test_db();
        db.ensure_schema().unwrap();
        db.insert(&item("Write report", "Q3 summary", Category::Urgent))
            .unwrap();

        let items = db.list_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Write report");
        assert_eq!(items[0].description.as_deref(), Some("Q3 summary"));
        assert_eq!(items[0].category, Category::Urgent);

        db.remove_by_title("Write report").unwrap();
        assert!(db.list_all().unwrap().is_empty());
    }
}
