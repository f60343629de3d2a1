//! Derived views of the application state.

use crate::types::{AppState, Todo, VisibilityFilter};
use std::sync::Arc;

/// Todos that pass `filter`, in display order
#[must_use]
pub fn visible_todos(todos: &[Arc<Todo>], filter: VisibilityFilter) -> Vec<Arc<Todo>> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

impl AppState {
    /// Todos visible under the current filter
    #[must_use]
    pub fn visible_todos(&self) -> Vec<Arc<Todo>> {
        visible_todos(&self.todos, self.visibility_filter)
    }
}
