//! Property tests for the to-do reducers and selectors

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use reflux_core::Reducer;
use reflux_runtime::Store;
use std::sync::Arc;
use todo::{
    AppState, Todo, TodoAction, TodoId, TodoList, TodosReducer, VisibilityFilter,
    VisibilityFilterReducer, todo_app, visible_todos,
};

fn arb_filter() -> impl Strategy<Value = VisibilityFilter> {
    prop_oneof![
        Just(VisibilityFilter::ShowAll),
        Just(VisibilityFilter::ShowActive),
        Just(VisibilityFilter::ShowCompleted),
    ]
}

/// Lists with unique, increasing ids and arbitrary completion flags
fn arb_list() -> impl Strategy<Value = TodoList> {
    prop::collection::vec(("[a-z ]{0,12}", any::<bool>()), 0..12).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (text, completed))| {
                Arc::new(Todo {
                    id: TodoId::new(i as u64),
                    text,
                    completed,
                })
            })
            .collect()
    })
}

fn arb_state() -> impl Strategy<Value = AppState> {
    (arb_list(), arb_filter()).prop_map(|(todos, visibility_filter)| AppState {
        todos,
        visibility_filter,
    })
}

fn arb_action() -> impl Strategy<Value = TodoAction> {
    prop_oneof![
        (0u64..16, "[a-z ]{0,12}").prop_map(|(id, text)| TodoAction::add(TodoId::new(id), text)),
        (0u64..16).prop_map(|id| TodoAction::toggle(TodoId::new(id))),
        arb_filter().prop_map(TodoAction::set_filter),
        Just(TodoAction::Unknown),
    ]
}

proptest! {
    #[test]
    fn prop_unknown_action_is_identity(state in arb_state()) {
        let todos = TodosReducer::new().reduce(&state.todos, &TodoAction::Unknown);
        prop_assert!(Arc::ptr_eq(&todos, &state.todos));

        let filter = VisibilityFilterReducer.reduce(&state.visibility_filter, &TodoAction::Unknown);
        prop_assert_eq!(filter, state.visibility_filter);

        prop_assert_eq!(todo_app().reduce(&state, &TodoAction::Unknown), state);
    }

    #[test]
    fn prop_double_toggle_is_identity(list in arb_list(), id in 0u64..16) {
        let reducer = TodosReducer::new();
        let action = TodoAction::toggle(TodoId::new(id));
        let twice = reducer.reduce(&reducer.reduce(&list, &action), &action);
        prop_assert_eq!(twice, list);
    }

    #[test]
    fn prop_toggle_preserves_order_and_length(list in arb_list(), id in 0u64..16) {
        let next = TodosReducer::new().reduce(&list, &TodoAction::toggle(TodoId::new(id)));
        prop_assert_eq!(next.len(), list.len());
        for (before, after) in list.iter().zip(next.iter()) {
            prop_assert_eq!(before.id, after.id);
            if before.id == TodoId::new(id) {
                prop_assert_eq!(after.completed, !before.completed);
            } else {
                prop_assert!(Arc::ptr_eq(before, after));
            }
        }
    }

    #[test]
    fn prop_add_appends_one_active_item(list in arb_list(), text in "[a-z]{1,8}") {
        let id = TodoId::new(list.len() as u64);
        let next = TodosReducer::new().reduce(&list, &TodoAction::add(id, text.clone()));
        prop_assert_eq!(next.len(), list.len() + 1);
        prop_assert_eq!(&next[..list.len()], &list[..]);
        prop_assert_eq!(&*next[list.len()], &Todo::new(id, text));
    }

    #[test]
    fn prop_root_delegates_per_slice(state in arb_state(), action in arb_action()) {
        let next = todo_app().reduce(&state, &action);
        prop_assert_eq!(&next.todos, &TodosReducer::new().reduce(&state.todos, &action));
        prop_assert_eq!(
            next.visibility_filter,
            VisibilityFilterReducer.reduce(&state.visibility_filter, &action)
        );
    }

    #[test]
    fn prop_reducers_do_not_mutate_input(state in arb_state(), action in arb_action()) {
        let snapshot = state.clone();
        let _ = todo_app().reduce(&state, &action);
        prop_assert_eq!(state, snapshot);
    }

    #[test]
    fn prop_show_active_filters_completed(list in arb_list()) {
        let active = visible_todos(&list, VisibilityFilter::ShowActive);
        let completed = list.iter().filter(|t| t.completed).count();
        prop_assert!(active.iter().all(|t| !t.completed));
        prop_assert_eq!(active.len(), list.len() - completed);
    }

    #[test]
    fn prop_store_dispatch_matches_root(
        state in arb_state(),
        actions in prop::collection::vec(arb_action(), 0..8),
    ) {
        let app = todo_app();
        let store = Store::with_state(todo_app(), state.clone());
        let expected = actions.iter().fold(state, |s, a| app.reduce(&s, a));
        for action in actions {
            store.dispatch(action).unwrap();
        }
        prop_assert_eq!(store.get_state(), expected);
    }
}
