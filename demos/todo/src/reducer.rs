//! Reducers for the to-do application.
//!
//! Three pure reducers, one per level of the state tree:
//!
//! - [`TodoReducer`]: a single todo (absent until added)
//! - [`TodosReducer`]: the ordered list, delegating per-item work to `TodoReducer`
//! - [`VisibilityFilterReducer`]: the visibility filter
//!
//! [`todo_app`] combines the list and filter reducers into the root reducer.

use crate::types::{AppState, Todo, TodoAction, TodoList, VisibilityFilter};
use reflux_core::{CombinedReducer, Reducer, scope_reducer};
use std::sync::Arc;

/// Reducer for a single todo
///
/// The state is `None` until an `ADD_TODO` creates the item.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = Option<Arc<Todo>>;
    type Action = TodoAction;

    fn initial_state(&self) -> Self::State {
        None
    }

    fn reduce(&self, state: &Self::State, action: &TodoAction) -> Self::State {
        match action {
            TodoAction::AddTodo { id, text } => Some(Arc::new(Todo::new(*id, text.clone()))),
            TodoAction::ToggleTodo { id } => match state {
                Some(todo) if todo.id == *id => Some(Arc::new(todo.toggled())),
                // Same allocation, so callers can compare with `Arc::ptr_eq`.
                _ => state.clone(),
            },
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Unknown => state.clone(),
        }
    }
}

/// Reducer for the ordered list of todos
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer {
    todo: TodoReducer,
}

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { todo: TodoReducer }
    }
}

impl Reducer for TodosReducer {
    type State = TodoList;
    type Action = TodoAction;

    fn initial_state(&self) -> TodoList {
        Arc::from(Vec::new())
    }

    fn reduce(&self, state: &TodoList, action: &TodoAction) -> TodoList {
        match action {
            TodoAction::AddTodo { .. } => state
                .iter()
                .cloned()
                .chain(self.todo.reduce(&None, action))
                .collect(),
            TodoAction::ToggleTodo { .. } => state
                .iter()
                .map(|todo| {
                    self.todo
                        .reduce(&Some(Arc::clone(todo)), action)
                        .unwrap_or_else(|| Arc::clone(todo))
                })
                .collect(),
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Unknown => Arc::clone(state),
        }
    }
}

/// Reducer for the visibility filter
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;

    fn initial_state(&self) -> VisibilityFilter {
        VisibilityFilter::ShowAll
    }

    fn reduce(&self, state: &VisibilityFilter, action: &TodoAction) -> VisibilityFilter {
        match action {
            TodoAction::SetVisibilityFilter { filter } => *filter,
            TodoAction::AddTodo { .. } | TodoAction::ToggleTodo { .. } | TodoAction::Unknown => {
                *state
            }
        }
    }
}

/// The root reducer type
pub type TodoApp = CombinedReducer<AppState, TodoAction>;

fn todos(state: &AppState) -> &TodoList {
    &state.todos
}

fn set_todos(state: &mut AppState, todos: TodoList) {
    state.todos = todos;
}

fn visibility_filter(state: &AppState) -> &VisibilityFilter {
    &state.visibility_filter
}

fn set_visibility_filter(state: &mut AppState, filter: VisibilityFilter) {
    state.visibility_filter = filter;
}

/// Root reducer: `todos` and `visibilityFilter` slices
#[must_use]
pub fn todo_app() -> TodoApp {
    CombinedReducer::new()
        .with_slice(scope_reducer::<AppState, _>(
            "todos",
            TodosReducer::new(),
            todos,
            set_todos,
        ))
        .with_slice(scope_reducer::<AppState, _>(
            "visibilityFilter",
            VisibilityFilterReducer,
            visibility_filter,
            set_visibility_filter,
        ))
}
