//! Domain types for the to-do list.
//!
//! The aggregate state has two slices: the ordered list of todos and the
//! visibility filter. Todos are shared (`Arc`) so reducers can pass untouched
//! items and untouched lists through without copying them.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Identifier of a todo, assigned by whoever issues the `ADD_TODO` action
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw integer
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| TodoError::InvalidCommand(format!("not a todo id: {s:?}")))
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text shown to the user
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// A copy with `completed` negated
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Ordered, immutable list of todos; insertion order is display order
pub type TodoList = Arc<[Arc<Todo>]>;

/// Which subset of todos the view displays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum VisibilityFilter {
    /// Every todo
    #[default]
    ShowAll,
    /// Todos not yet completed
    ShowActive,
    /// Completed todos
    ShowCompleted,
}

impl VisibilityFilter {
    /// Every filter, in the order the view lists them
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    /// Wire name, e.g. `SHOW_ACTIVE`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
        }
    }

    /// Label shown by the view
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }

    /// Whether `todo` passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::ShowAll => true,
            Self::ShowActive => !todo.completed,
            Self::ShowCompleted => todo.completed,
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts wire names (`SHOW_ALL`) and the short forms used at the prompt
/// (`all`, `active`, `completed`). Anything else is rejected.
impl FromStr for VisibilityFilter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SHOW_ALL" | "all" => Ok(Self::ShowAll),
            "SHOW_ACTIVE" | "active" => Ok(Self::ShowActive),
            "SHOW_COMPLETED" | "completed" => Ok(Self::ShowCompleted),
            other => Err(TodoError::UnknownFilter(other.to_string())),
        }
    }
}

impl TryFrom<String> for VisibilityFilter {
    type Error = TodoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Actions understood by the to-do reducers
///
/// On the wire an action is an object tagged by its `type` field:
///
/// ```json
/// {"type": "ADD_TODO", "id": 0, "text": "Learn Redux"}
/// {"type": "TOGGLE_TODO", "id": 0}
/// {"type": "SET_VISIBILITY_FILTER", "filter": "SHOW_COMPLETED"}
/// ```
///
/// Any other tag decodes to [`TodoAction::Unknown`], which every reducer
/// passes through unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo
    AddTodo {
        /// Identifier for the new todo
        id: TodoId,
        /// Text of the new todo
        text: String,
    },

    /// Flip `completed` on the todo with this identifier
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Change which todos are visible
    SetVisibilityFilter {
        /// The new filter
        filter: VisibilityFilter,
    },

    /// An action with a tag no reducer recognises
    #[serde(other)]
    Unknown,
}

impl TodoAction {
    /// `ADD_TODO`
    #[must_use]
    pub fn add(id: TodoId, text: impl Into<String>) -> Self {
        Self::AddTodo {
            id,
            text: text.into(),
        }
    }

    /// `TOGGLE_TODO`
    #[must_use]
    pub const fn toggle(id: TodoId) -> Self {
        Self::ToggleTodo { id }
    }

    /// `SET_VISIBILITY_FILTER`
    #[must_use]
    pub const fn set_filter(filter: VisibilityFilter) -> Self {
        Self::SetVisibilityFilter { filter }
    }

    /// Decode an action from its JSON wire shape
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Decode`] if the input is not a valid action,
    /// including a `SET_VISIBILITY_FILTER` with an unknown filter.
    pub fn from_json(input: &str) -> Result<Self, TodoError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Encode this action in its JSON wire shape
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TodoError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Aggregate state of the to-do application
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// All todos, in insertion order
    pub todos: TodoList,
    /// Current visibility filter
    pub visibility_filter: VisibilityFilter,
}

impl AppState {
    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().map(AsRef::as_ref).find(|t| t.id == id)
    }

    /// Encode the state as JSON
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TodoError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            todos: Arc::from(Vec::new()),
            visibility_filter: VisibilityFilter::default(),
        }
    }
}
