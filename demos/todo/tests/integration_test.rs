//! Integration tests for the to-do reducers with a Store
//!
//! These tests exercise the full flow: action → root reducer → commit →
//! observer notification.

#![allow(clippy::unwrap_used)]

use reflux_core::Reducer;
use reflux_runtime::Store;
use reflux_testing::{ObserverLog, StateRecorder, init_test_tracing};
use std::sync::Arc;
use todo::{
    AppState, Todo, TodoAction, TodoId, TodosReducer, VisibilityFilter, VisibilityFilterReducer,
    todo_app,
};

#[test]
fn test_initial_state_from_slice_defaults() {
    let store = Store::new(todo_app());
    let state = store.get_state();
    assert!(state.todos.is_empty());
    assert_eq!(state.visibility_filter, VisibilityFilter::ShowAll);
}

#[test]
fn test_walkthrough_with_store() {
    init_test_tracing();
    let store = Store::new(todo_app());
    let recorder = StateRecorder::attach(&store);

    store
        .dispatch(TodoAction::add(TodoId::new(0), "Learn Redux"))
        .unwrap();
    store
        .dispatch(TodoAction::add(TodoId::new(1), "go shopping"))
        .unwrap();
    store.dispatch(TodoAction::toggle(TodoId::new(0))).unwrap();
    store
        .dispatch(TodoAction::set_filter(VisibilityFilter::ShowCompleted))
        .unwrap();

    let states = recorder.states();
    assert_eq!(states.len(), 4);
    assert_eq!(states[0].count(), 1);
    assert_eq!(states[1].count(), 2);
    assert_eq!(states[2].completed_count(), 1);

    let last = store.get_state();
    assert_eq!(last.visibility_filter, VisibilityFilter::ShowCompleted);
    let visible = last.visible_todos();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].text, "Learn Redux");
}

#[test]
fn test_dispatch_equals_root_reducer() {
    let app = todo_app();
    let store = Store::new(todo_app());
    let actions = [
        TodoAction::add(TodoId::new(0), "a"),
        TodoAction::Unknown,
        TodoAction::toggle(TodoId::new(0)),
        TodoAction::toggle(TodoId::new(5)),
        TodoAction::set_filter(VisibilityFilter::ShowActive),
    ];

    for action in actions {
        let expected = app.reduce(&store.get_state(), &action);
        store.dispatch(action).unwrap();
        assert_eq!(store.get_state(), expected);
    }
}

#[test]
fn test_observers_notified_once_per_dispatch_in_order() {
    let store = Store::new(todo_app());
    let log = ObserverLog::new();
    let _a = store.subscribe(log.observer("render"));
    let _b = store.subscribe(log.observer("audit"));

    store
        .dispatch(TodoAction::add(TodoId::new(0), "Learn Redux"))
        .unwrap();
    assert_eq!(log.calls(), vec!["render", "audit"]);

    // Unrecognised actions still notify.
    store.dispatch(TodoAction::Unknown).unwrap();
    assert_eq!(log.calls(), vec!["render", "audit", "render", "audit"]);
}

#[test]
fn test_unknown_action_keeps_list_allocation() {
    let store = Store::new(todo_app());
    store
        .dispatch(TodoAction::add(TodoId::new(0), "Learn Redux"))
        .unwrap();
    let before = store.get_state();
    store.dispatch(TodoAction::Unknown).unwrap();
    let after = store.get_state();
    assert!(Arc::ptr_eq(&before.todos, &after.todos));
}

#[test]
fn test_observer_dispatch_is_applied_after_publish() {
    let store = Store::new(todo_app());
    let recorder = StateRecorder::attach(&store);
    let weak = store.downgrade();

    // Auto-complete every newly added todo.
    let _ = store.subscribe(move || {
        let Some(store) = weak.upgrade() else { return };
        let state = store.get_state();
        if let Some(last) = state.todos.last() {
            if !last.completed {
                store.dispatch(TodoAction::toggle(last.id)).unwrap();
            }
        }
    });

    store
        .dispatch(TodoAction::add(TodoId::new(0), "Learn Redux"))
        .unwrap();

    let states = recorder.states();
    assert_eq!(states.len(), 2);
    assert!(!states[0].todos[0].completed);
    assert!(states[1].todos[0].completed);
    assert_eq!(store.get_state().completed_count(), 1);
}

#[test]
fn test_preloaded_state() {
    let preloaded = AppState {
        todos: vec![Arc::new(Todo::new(TodoId::new(3), "preloaded"))].into(),
        visibility_filter: VisibilityFilter::ShowActive,
    };
    let store = Store::with_state(todo_app(), preloaded.clone());
    assert_eq!(store.get_state(), preloaded);

    store.dispatch(TodoAction::toggle(TodoId::new(3))).unwrap();
    assert!(store.get_state().visible_todos().is_empty());
}

#[test]
fn test_independent_stores() {
    let first = Store::new(todo_app());
    let second = Store::new(todo_app());
    first
        .dispatch(TodoAction::add(TodoId::new(0), "only here"))
        .unwrap();
    assert_eq!(first.get_state().count(), 1);
    assert_eq!(second.get_state().count(), 0);
}

#[test]
fn test_json_actions_through_store() {
    let store = Store::new(todo_app());
    for line in [
        r#"{"type":"ADD_TODO","id":0,"text":"Learn Redux"}"#,
        r#"{"type":"@@redux/INIT"}"#,
        r#"{"type":"TOGGLE_TODO","id":0}"#,
        r#"{"type":"SET_VISIBILITY_FILTER","filter":"SHOW_ACTIVE"}"#,
    ] {
        store.dispatch(TodoAction::from_json(line).unwrap()).unwrap();
    }
    let state = store.get_state();
    assert_eq!(
        state.to_json().unwrap(),
        r#"{"todos":[{"id":0,"text":"Learn Redux","completed":true}],"visibilityFilter":"SHOW_ACTIVE"}"#
    );
}

#[test]
fn test_state_json_round_trip_preloads_store() {
    let json = r#"{"todos":[{"id":1,"text":"go shopping","completed":false}],"visibilityFilter":"SHOW_ALL"}"#;
    let state: AppState = serde_json::from_str(json).unwrap();
    let store = Store::with_state(todo_app(), state);
    store.dispatch(TodoAction::toggle(TodoId::new(1))).unwrap();
    assert_eq!(store.get_state().completed_count(), 1);
}

#[test]
fn test_slice_reducers_standalone() {
    let todos = TodosReducer::new();
    let list = todos.reduce(
        &todos.initial_state(),
        &TodoAction::add(TodoId::new(0), "Learn Redux"),
    );
    assert_eq!(*list[0], Todo::new(TodoId::new(0), "Learn Redux"));

    let filter = VisibilityFilterReducer.reduce(
        &VisibilityFilterReducer.initial_state(),
        &TodoAction::set_filter(VisibilityFilter::ShowCompleted),
    );
    assert_eq!(filter, VisibilityFilter::ShowCompleted);
}
