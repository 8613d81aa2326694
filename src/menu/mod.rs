//! Menu-driven dispatcher.
//!
//! The menus form a small state machine: `Main` → `ViewManage` → `Schedule`,
//! with `Exit` as the only terminal state. Each `step` reads exactly one line
//! in the current state, runs whatever that line selects, and moves to the
//! next state. Transitions are plain functions on `MenuState` so they can be
//! checked without a console or a database.
//!
//! Store errors the user can fix (blank title, unknown title) are printed and
//! the loop carries on. Anything else ends the session as a `MenuError`.

mod actions;
pub mod choices;

pub use choices::{MainChoice, ScheduleInput, ViewChoice};

use crate::console::Console;
use crate::db::{DbError, TodoDb};
use crate::error::MenuError;

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
const CHOICE_PROMPT: &str = "Enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    ViewManage,
    Schedule,
    Exit,
}

/// What happened on one pass through the schedule sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    GoBack,
    Scheduled,
    /// Matched a title, but the store no longer had it.
    Vanished,
    NoMatch,
}

impl MenuState {
    pub fn after_main(choice: MainChoice) -> MenuState {
        match choice {
            MainChoice::ViewManage => MenuState::ViewManage,
            MainChoice::Quit => MenuState::Exit,
            MainChoice::AddItem | MainChoice::Help | MainChoice::About => MenuState::Main,
        }
    }

    pub fn after_view(choice: ViewChoice) -> MenuState {
        match choice {
            ViewChoice::Schedule => MenuState::Schedule,
            ViewChoice::Back => MenuState::Main,
            _ => MenuState::ViewManage,
        }
    }

    pub fn after_schedule(outcome: ScheduleOutcome) -> MenuState {
        match outcome {
            ScheduleOutcome::NoMatch => MenuState::Schedule,
            ScheduleOutcome::GoBack | ScheduleOutcome::Scheduled | ScheduleOutcome::Vanished => {
                MenuState::ViewManage
            }
        }
    }
}

pub struct Dispatcher<'a, C: Console> {
    db: &'a TodoDb,
    console: &'a mut C,
    state: MenuState,
}

impl<'a, C: Console> Dispatcher<'a, C> {
    pub fn new(db: &'a TodoDb, console: &'a mut C) -> Self {
        Self {
            db,
            console,
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Loop until the user quits.
    ///
    /// End of input is treated as a quit. Other errors are returned.
    pub fn run(&mut self) -> Result<(), MenuError> {
        while self.state != MenuState::Exit {
            match self.step() {
                Ok(_) => {}
                Err(MenuError::InputClosed) => {
                    log::warn!("Input closed in {:?} menu; exiting", self.state);
                    self.state = MenuState::Exit;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Read one line in the current state, act on it, and advance.
    pub fn step(&mut self) -> Result<MenuState, MenuError> {
        let next = match self.state {
            MenuState::Main => self.main_step()?,
            MenuState::ViewManage => self.view_step()?,
            MenuState::Schedule => MenuState::after_schedule(self.schedule_step()?),
            MenuState::Exit => MenuState::Exit,
        };
        log::trace!("Menu transition {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }

    fn main_step(&mut self) -> Result<MenuState, MenuError> {
        self.say("")?;
        for choice in MainChoice::ALL {
            self.say(&format!("{}. {}", choice.key(), choice.label()))?;
        }
        let input = self.read(CHOICE_PROMPT)?;

        let Some(choice) = MainChoice::parse(&input) else {
            self.say(INVALID_CHOICE)?;
            return Ok(MenuState::Main);
        };

        match choice {
            MainChoice::AddItem => self.add_item()?,
            MainChoice::Help => self.show_help()?,
            MainChoice::About => self.show_about()?,
            MainChoice::ViewManage | MainChoice::Quit => {}
        }
        Ok(MenuState::after_main(choice))
    }

    fn view_step(&mut self) -> Result<MenuState, MenuError> {
        self.say("")?;
        for choice in ViewChoice::ALL {
            self.say(&format!("{}. {}", choice.key(), choice.label()))?;
        }
        let input = self.read(CHOICE_PROMPT)?;

        let Some(choice) = ViewChoice::parse(&input) else {
            self.say(INVALID_CHOICE)?;
            return Ok(MenuState::ViewManage);
        };

        if choice.is_stub() {
            self.not_implemented(choice)?;
            return Ok(MenuState::after_view(choice));
        }

        match choice {
            ViewChoice::ViewAll => self.view_all()?,
            ViewChoice::ViewUncategorized => self.view_uncategorized()?,
            ViewChoice::ViewByCategory => self.view_by_category()?,
            ViewChoice::Remove => self.remove_item()?,
            ViewChoice::Edit | ViewChoice::Focus | ViewChoice::Schedule | ViewChoice::Back => {}
        }
        Ok(MenuState::after_view(choice))
    }

    // =========================================================================
    // Console helpers
    // =========================================================================

    fn say(&mut self, line: &str) -> Result<(), MenuError> {
        self.console.say(line)?;
        Ok(())
    }

    fn read(&mut self, prompt: &str) -> Result<String, MenuError> {
        self.console.prompt(prompt)?.ok_or(MenuError::InputClosed)
    }

    /// Print recoverable store errors and carry on; escalate the rest.
    fn recover<T>(
        &mut self,
        operation: &'static str,
        result: Result<T, DbError>,
    ) -> Result<Option<T>, MenuError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                log::debug!("{} rejected: {}", operation, err);
                self.say(&format!("{err}."))?;
                Ok(None)
            }
            Err(err) => Err(MenuError::store(operation, err)),
        }
    }
}
