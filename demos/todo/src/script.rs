//! Scripted walkthrough: dispatch a fixed sequence of actions, print the
//! state after each one and run the reducer self-checks.

use crate::error::TodoError;
use crate::reducer::{TodoApp, TodosReducer};
use crate::types::{AppState, Todo, TodoAction, TodoId, TodoList, VisibilityFilter};
use reflux_core::Reducer;
use reflux_runtime::Store;
use std::io::Write;
use std::sync::Arc;

const RULE: &str = "--------------";

fn print_state<W: Write>(out: &mut W, state: &AppState) -> Result<(), TodoError> {
    writeln!(out, "current state.")?;
    writeln!(out, "{}", state.to_json()?)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn dispatch<W: Write>(
    store: &Store<TodoApp>,
    out: &mut W,
    action: TodoAction,
) -> Result<(), TodoError> {
    writeln!(out, "dispatching {}", action.to_json()?)?;
    store.dispatch(action)?;
    print_state(out, &store.get_state())
}

/// Adding to an empty list yields exactly the new, active todo
///
/// # Errors
///
/// Returns [`TodoError::SelfCheckFailed`] if the list reducer disagrees.
pub fn check_add_todo() -> Result<(), TodoError> {
    let before: TodoList = Arc::from(Vec::new());
    let action = TodoAction::add(TodoId::new(0), "Learn Redux");
    let expected: TodoList = vec![Arc::new(Todo::new(TodoId::new(0), "Learn Redux"))].into();

    let after = TodosReducer::new().reduce(&before, &action);
    if after != expected || !before.is_empty() {
        return Err(TodoError::SelfCheckFailed("add todo"));
    }
    Ok(())
}

/// Toggling one of two todos changes only that todo
///
/// # Errors
///
/// Returns [`TodoError::SelfCheckFailed`] if the list reducer disagrees.
pub fn check_toggle_todo() -> Result<(), TodoError> {
    let before: TodoList = vec![
        Arc::new(Todo::new(TodoId::new(0), "Learn Redux")),
        Arc::new(Todo::new(TodoId::new(1), "go shopping")),
    ]
    .into();
    let snapshot = before.clone();
    let expected: TodoList = vec![
        Arc::new(Todo::new(TodoId::new(0), "Learn Redux")),
        Arc::new(Todo::new(TodoId::new(1), "go shopping").toggled()),
    ]
    .into();

    let after = TodosReducer::new().reduce(&before, &TodoAction::toggle(TodoId::new(1)));
    if after != expected || before != snapshot {
        return Err(TodoError::SelfCheckFailed("toggle todo"));
    }
    Ok(())
}

/// Run the walkthrough against `store`, writing to `out`
///
/// # Errors
///
/// Returns an error if writing fails, the store rejects an action or a
/// self-check fails.
pub fn run<W: Write>(store: &Store<TodoApp>, out: &mut W) -> Result<(), TodoError> {
    writeln!(out, "initial state.")?;
    writeln!(out, "{}", store.get_state().to_json()?)?;
    writeln!(out, "{RULE}")?;

    dispatch(store, out, TodoAction::add(TodoId::new(0), "Learn Redux"))?;
    dispatch(store, out, TodoAction::add(TodoId::new(1), "go shopping"))?;
    dispatch(store, out, TodoAction::toggle(TodoId::new(0)))?;

    check_add_todo()?;
    check_toggle_todo()?;
    tracing::info!("Reducer self-checks passed");
    writeln!(out, "{RULE}")?;

    dispatch(
        store,
        out,
        TodoAction::set_filter(VisibilityFilter::ShowCompleted),
    )?;

    writeln!(out, "All tests passed")?;
    Ok(())
}
