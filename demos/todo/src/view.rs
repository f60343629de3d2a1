//! Terminal view of the to-do list.
//!
//! The view renders the whole list from the current state after every
//! dispatch and turns prompt commands into actions. It owns the id counter
//! for new todos; reducers never assign ids.

use crate::error::TodoError;
use crate::types::{AppState, TodoAction, TodoId, VisibilityFilter};
use std::fmt::Write as _;
use std::str::FromStr;

/// Prompt help text
pub const HELP: &str = "\
Commands:
  add <text>                      add a todo
  toggle <id>                     toggle a todo
  filter all|active|completed     change the visible todos
  state                           print the state as JSON
  help                            show this help
  quit                            exit";

/// Render the state as text: visible todos, then the filter links
#[must_use]
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let visible = state.visible_todos();

    if visible.is_empty() {
        out.push_str("  (nothing to show)\n");
    }
    for todo in &visible {
        let (mark, text) = if todo.completed {
            ("x", format!("~~{}~~", todo.text))
        } else {
            (" ", todo.text.clone())
        };
        let _ = writeln!(out, "  [{mark}] {:>3}  {text}", todo.id);
    }

    let links: Vec<String> = VisibilityFilter::ALL
        .iter()
        .map(|filter| filter_link(*filter, state.visibility_filter))
        .collect();
    let _ = write!(out, "Show: {}", links.join(" "));
    out
}

/// The current filter renders as plain text, the others as links
#[must_use]
pub fn filter_link(filter: VisibilityFilter, current: VisibilityFilter) -> String {
    if filter == current {
        filter.label().to_string()
    } else {
        format!("[{}]", filter.label())
    }
}

/// A command typed at the prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a todo with this text
    Add(String),
    /// Toggle a todo
    Toggle(TodoId),
    /// Change the visibility filter
    Filter(VisibilityFilter),
    /// Print the state as JSON
    State,
    /// Print the help text
    Help,
    /// Leave the prompt
    Quit,
}

impl FromStr for Command {
    type Err = TodoError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "add" if rest.is_empty() => Err(TodoError::InvalidCommand(
                "add needs the text of the todo".to_string(),
            )),
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => Ok(Self::Toggle(rest.parse()?)),
            "filter" => Ok(Self::Filter(rest.parse()?)),
            "state" => Ok(Self::State),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(TodoError::InvalidCommand(format!(
                "unknown command {other:?}, try `help`"
            ))),
        }
    }
}

/// Translates user gestures into actions
#[derive(Debug, Default)]
pub struct TodoView {
    next_todo_id: TodoId,
}

impl TodoView {
    /// A view whose first todo gets id 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose next todo gets `next_todo_id`
    #[must_use]
    pub const fn starting_at(next_todo_id: TodoId) -> Self {
        Self { next_todo_id }
    }

    /// The id the next added todo will receive
    #[must_use]
    pub const fn next_todo_id(&self) -> TodoId {
        self.next_todo_id
    }

    /// `ADD_TODO` with the next id from the counter
    pub fn add_todo(&mut self, text: impl Into<String>) -> TodoAction {
        let id = self.next_todo_id;
        self.next_todo_id = id.next();
        TodoAction::add(id, text)
    }

    /// The action a command dispatches, if any
    pub fn action_for(&mut self, command: &Command) -> Option<TodoAction> {
        match command {
            Command::Add(text) => Some(self.add_todo(text.clone())),
            Command::Toggle(id) => Some(TodoAction::toggle(*id)),
            Command::Filter(filter) => Some(TodoAction::set_filter(*filter)),
            Command::State | Command::Help | Command::Quit => None,
        }
    }
}
