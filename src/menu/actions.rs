//! What each menu option actually does.

use super::{Dispatcher, ScheduleInput, ScheduleOutcome, ViewChoice};
use crate::category::Category;
use crate::console::Console;
use crate::db::{Removed, ScheduleWindow, TodoItem};
use crate::error::MenuError;

impl<'a, C: Console> Dispatcher<'a, C> {
    // =========================================================================
    // Main menu
    // =========================================================================

    pub(super) fn add_item(&mut self) -> Result<(), MenuError> {
        let title = self.read("Enter the title: ")?;
        let description = self.read("Enter the description: ")?;
        let known: Vec<String> = Category::KNOWN.into_iter().map(|c| c.to_string()).collect();
        let category = self.read(&format!("Enter the category ({}): ", known.join(", ")))?;

        let description = (!description.trim().is_empty()).then_some(description);
        let category = match category.trim() {
            "" => Category::Uncategorized,
            raw => Category::from_str_lossy(raw),
        };

        let item = TodoItem::new(title, description, category);
        let result = self.db.insert(&item);
        if self.recover("add", result)?.is_some() {
            self.say("To-do item added successfully.")?;
        }
        Ok(())
    }

    pub(super) fn show_help(&mut self) -> Result<(), MenuError> {
        self.say("")?;
        for line in [
            "Type the number of a menu option and press Enter.",
            "Items are looked up by their exact title when removing or scheduling.",
            "Categories: urgent, schedule, delegate, automate, eliminate, uncategorized.",
            "Only items in the 'schedule' category can be given start and end times.",
        ] {
            self.say(line)?;
        }
        Ok(())
    }

    pub(super) fn show_about(&mut self) -> Result<(), MenuError> {
        self.say("")?;
        self.say(&format!("CLI To-Do {}", env!("CARGO_PKG_VERSION")))?;
        self.say("A menu-driven to-do list kept in a local SQLite file.")?;
        Ok(())
    }

    // =========================================================================
    // View / manage
    // =========================================================================

    pub(super) fn view_all(&mut self) -> Result<(), MenuError> {
        let items = self
            .db
            .list_all()
            .map_err(|e| MenuError::store("list all", e))?;

        if items.is_empty() {
            return self.say("No to-do items found.");
        }

        self.say("")?;
        self.say("All to-do items:")?;
        for (i, item) in items.iter().enumerate() {
            self.say(&format!(
                "{}. {} - {} ({})",
                i + 1,
                item.title,
                description_of(item),
                item.category
            ))?;
        }
        Ok(())
    }

    pub(super) fn view_uncategorized(&mut self) -> Result<(), MenuError> {
        let items = self
            .db
            .list_uncategorized()
            .map_err(|e| MenuError::store("list uncategorized", e))?;

        if items.is_empty() {
            return self.say("No uncategorized to-do items found.");
        }

        self.say("")?;
        self.say("Uncategorized to-do items:")?;
        self.say_numbered(&items)
    }

    /// The category text is matched verbatim. Only the decision to show the
    /// scheduling window ignores case.
    pub(super) fn view_by_category(&mut self) -> Result<(), MenuError> {
        let raw =
            self.read("Enter the category (urgent, schedule, delegate, automate, eliminate): ")?;
        let raw = raw.trim();
        let items = self
            .db
            .list_by_category(&Category::from_str_lossy(raw))
            .map_err(|e| MenuError::store("list by category", e))?;

        if items.is_empty() {
            return self.say(&format!("No to-do items found in category '{raw}'."));
        }

        self.say("")?;
        self.say(&format!("To-do items in category '{raw}':"))?;
        if !raw.eq_ignore_ascii_case(Category::Schedule.as_str()) {
            return self.say_numbered(&items);
        }

        for (i, item) in items.iter().enumerate() {
            self.say(&format!("{}. {} - {}", i + 1, item.title, description_of(item)))?;
            self.say(&format!(
                "   Start: {} at {}",
                or_unset(&item.start_date),
                or_unset(&item.start_time)
            ))?;
            self.say(&format!(
                "   End: {} at {}",
                or_unset(&item.end_date),
                or_unset(&item.end_time)
            ))?;
            self.say("")?;
        }
        Ok(())
    }

    pub(super) fn remove_item(&mut self) -> Result<(), MenuError> {
        let title = self.read("Enter the title of the to-do item to remove: ")?;

        let found = self
            .db
            .find_by_title(&title)
            .map_err(|e| MenuError::store("find by title", e))?;
        if found.is_none() {
            return self.say(&format!("No to-do item found with title '{title}'."));
        }

        let confirm = self.read(&format!(
            "Are you sure you want to remove the to-do item '{title}'? (y/n): "
        ))?;
        if !confirm.trim().eq_ignore_ascii_case("y") {
            return self.say("Removal cancelled.");
        }

        let result = self.db.remove_by_title(&title);
        match self.recover("remove", result)? {
            Some(Removed { count: 1 }) => self.say("To-do item removed successfully."),
            Some(Removed { count }) => {
                self.say(&format!("{count} to-do items removed successfully."))
            }
            None => Ok(()),
        }
    }

    pub(super) fn not_implemented(&mut self, choice: ViewChoice) -> Result<(), MenuError> {
        log::debug!("{:?} selected; not implemented", choice);
        self.say("")?;
        self.say(&format!("{}: not implemented yet.", choice.label()))
    }

    // =========================================================================
    // Schedule sub-flow
    // =========================================================================

    /// One pass: list `schedule` items, read a title (or the back key), and
    /// if it matches collect and store the four scheduling fields.
    ///
    /// Selection is by typed title, case-insensitively. The list is numbered
    /// for display only.
    pub(super) fn schedule_step(&mut self) -> Result<ScheduleOutcome, MenuError> {
        let items = self
            .db
            .list_by_category(&Category::Schedule)
            .map_err(|e| MenuError::store("list schedule items", e))?;

        self.say("")?;
        self.say("Which to-do item would you like to schedule?")?;
        if items.is_empty() {
            self.say("No items categorized as 'schedule' found.")?;
        } else {
            for (i, item) in items.iter().enumerate() {
                self.say(&format!("{}. {}", i + 1, item.title))?;
            }
        }
        self.say(&format!("{}. Go back", ScheduleInput::BACK_KEY))?;

        let input = self.read("Enter your choice: ")?;
        let wanted = match ScheduleInput::parse(&input) {
            ScheduleInput::GoBack => return Ok(ScheduleOutcome::GoBack),
            ScheduleInput::Title(wanted) => wanted.to_lowercase(),
        };

        let Some(item) = items
            .into_iter()
            .find(|item| item.title.to_lowercase() == wanted)
        else {
            self.say(
                "Sorry, that item doesn't match any scheduled to-do. \
                 Please try again by typing the name exactly, not the number.",
            )?;
            return Ok(ScheduleOutcome::NoMatch);
        };

        self.say("")?;
        self.say(&format!("Scheduling item: {}", item.title))?;
        let window = self.read_window(&item.title)?;

        let result = self.db.update_schedule(&item.title, &window);
        match self.recover("update schedule", result)? {
            Some(()) => {
                self.say("Schedule information updated successfully.")?;
                Ok(ScheduleOutcome::Scheduled)
            }
            None => Ok(ScheduleOutcome::Vanished),
        }
    }

    fn read_window(&mut self, title: &str) -> Result<ScheduleWindow, MenuError> {
        Ok(ScheduleWindow {
            start_date: self.read(&format!(
                "What day would you like to start on {title}? (YYMMDD format): "
            ))?,
            start_time: self.read(&format!(
                "What time would you like to start on {title}? (hh:mm AM/PM format): "
            ))?,
            end_date: self.read(&format!(
                "What day would you like to complete {title}? (YYMMDD format): "
            ))?,
            end_time: self.read(&format!(
                "What time would you like to complete {title}? (hh:mm AM/PM format): "
            ))?,
        })
    }

    fn say_numbered(&mut self, items: &[TodoItem]) -> Result<(), MenuError> {
        for (i, item) in items.iter().enumerate() {
            self.say(&format!("{}. {} - {}", i + 1, item.title, description_of(item)))?;
        }
        Ok(())
    }
}

fn description_of(item: &TodoItem) -> &str {
    item.description.as_deref().unwrap_or("")
}

fn or_unset(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("not set")
}
