//! To-do list demo built on reducer composition.
//!
//! This example shows how to build a small to-do application with reflux.
//! It demonstrates:
//!
//! - An item reducer composed into a list reducer
//! - A second, independent slice (the visibility filter)
//! - Root composition with `CombinedReducer`
//! - A store whose observer re-renders the whole view after every dispatch
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```
//! use reflux_runtime::Store;
//! use todo::{TodoAction, TodoId, VisibilityFilter, todo_app};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(todo_app());
//!
//! store.dispatch(TodoAction::add(TodoId::new(0), "Learn Redux"))?;
//! store.dispatch(TodoAction::toggle(TodoId::new(0)))?;
//! store.dispatch(TodoAction::set_filter(VisibilityFilter::ShowCompleted))?;
//!
//! let state = store.get_state();
//! assert_eq!(state.count(), 1);
//! assert_eq!(state.visible_todos().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reducer;
pub mod script;
pub mod selectors;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::TodoError;
pub use reducer::{TodoApp, TodoReducer, TodosReducer, VisibilityFilterReducer, todo_app};
pub use selectors::visible_todos;
pub use types::{AppState, Todo, TodoAction, TodoId, TodoList, VisibilityFilter};
pub use view::{Command, TodoView, render};
