//! Menu options and how typed input maps onto them.

/// Top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    AddItem,
    ViewManage,
    Help,
    About,
    Quit,
}

impl MainChoice {
    pub const ALL: [MainChoice; 5] = [
        MainChoice::AddItem,
        MainChoice::ViewManage,
        MainChoice::Help,
        MainChoice::About,
        MainChoice::Quit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MainChoice::AddItem => "1",
            MainChoice::ViewManage => "2",
            MainChoice::Help => "3",
            MainChoice::About => "4",
            MainChoice::Quit => "5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MainChoice::AddItem => "Add To-Do Item",
            MainChoice::ViewManage => "View and Manage To-Do Items",
            MainChoice::Help => "How to Use CLI To-Do",
            MainChoice::About => "About CLI To-Do app",
            MainChoice::Quit => "Quit",
        }
    }

    /// Match surrounding-whitespace-trimmed input against the option keys.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == input)
    }
}

/// View/Manage submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChoice {
    ViewAll,
    ViewUncategorized,
    ViewByCategory,
    Remove,
    Edit,
    Schedule,
    Focus,
    Back,
}

impl ViewChoice {
    pub const ALL: [ViewChoice; 8] = [
        ViewChoice::ViewAll,
        ViewChoice::ViewUncategorized,
        ViewChoice::ViewByCategory,
        ViewChoice::Remove,
        ViewChoice::Edit,
        ViewChoice::Schedule,
        ViewChoice::Focus,
        ViewChoice::Back,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewChoice::ViewAll => "1",
            ViewChoice::ViewUncategorized => "2",
            ViewChoice::ViewByCategory => "3",
            ViewChoice::Remove => "4",
            ViewChoice::Edit => "5",
            ViewChoice::Schedule => "6",
            ViewChoice::Focus => "7",
            ViewChoice::Back => "8",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewChoice::ViewAll => "View all to-do items",
            ViewChoice::ViewUncategorized => "View uncategorized to-do items",
            ViewChoice::ViewByCategory => "View to-do items by category",
            ViewChoice::Remove => "Remove a to-do item",
            ViewChoice::Edit => "Edit a to-do item",
            ViewChoice::Schedule => "Schedule a to-do item",
            ViewChoice::Focus => "Focus on Urgent to-do item",
            ViewChoice::Back => "Back to main menu",
        }
    }

    /// Options that are on the menu but do nothing yet.
    pub fn is_stub(self) -> bool {
        matches!(self, ViewChoice::Edit | ViewChoice::Focus)
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == input)
    }
}

/// Input accepted by the schedule sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleInput<'a> {
    GoBack,
    /// Free text to match against item titles, ignoring case.
    Title(&'a str),
}

impl<'a> ScheduleInput<'a> {
    /// Typing this always leaves the sub-flow, even if an item has this title.
    pub const BACK_KEY: &'static str = "3";

    pub fn parse(input: &'a str) -> Self {
        let input = input.trim();
        if input == Self::BACK_KEY {
            ScheduleInput::GoBack
        } else {
            ScheduleInput::Title(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_keys_parse_back() {
        for choice in MainChoice::ALL {
            assert_eq!(MainChoice::parse(choice.key()), Some(choice));
        }
        assert_eq!(MainChoice::parse(" 5 \n"), Some(MainChoice::Quit));
    }

    #[test]
    fn test_unknown_main_input() {
        for input in ["", "0", "6", "8", "quit", "1 2"] {
            assert_eq!(MainChoice::parse(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_view_keys_parse_back() {
        for choice in ViewChoice::ALL {
            assert_eq!(ViewChoice::parse(choice.key()), Some(choice));
        }
        assert_eq!(ViewChoice::parse("9"), None);
        assert_eq!(ViewChoice::parse("back"), None);
    }

    #[test]
    fn test_only_edit_and_focus_are_stubs() {
        let stubs: Vec<ViewChoice> = ViewChoice::ALL
            .into_iter()
            .filter(|choice| choice.is_stub())
            .collect();
        assert_eq!(stubs, vec![ViewChoice::Edit, ViewChoice::Focus]);
    }

    #[test]
    fn test_schedule_input() {
        assert_eq!(ScheduleInput::parse("3"), ScheduleInput::GoBack);
        assert_eq!(ScheduleInput::parse(" 3 "), ScheduleInput::GoBack);
        assert_eq!(
            ScheduleInput::parse("Plan Offsite "),
            ScheduleInput::Title("Plan Offsite")
        );
        // A list index other than the back key is treated as a title.
        assert_eq!(ScheduleInput::parse("1"), ScheduleInput::Title("1"));
    }
}
