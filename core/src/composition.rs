//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`scope_reducer`**: Focus a reducer on one named field of a larger state
//! - **`combine_reducers`**: Assemble named slices into one root reducer
//!
//! # Examples
//!
//! ```
//! use reflux_core::{Reducer, combine_reducers, scope_reducer};
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Increment,
//!     Rename(String),
//! }
//!
//! struct CounterReducer;
//! struct NameReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i32;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> i32 {
//!         0
//!     }
//!
//!     fn reduce(&self, state: &i32, action: &AppAction) -> i32 {
//!         match action {
//!             AppAction::Increment => state + 1,
//!             AppAction::Rename(_) => *state,
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> String {
//!         "anonymous".to_string()
//!     }
//!
//!     fn reduce(&self, state: &String, action: &AppAction) -> String {
//!         match action {
//!             AppAction::Rename(name) => name.clone(),
//!             AppAction::Increment => state.clone(),
//!         }
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     count: i32,
//!     name: String,
//! }
//!
//! fn count(state: &AppState) -> &i32 {
//!     &state.count
//! }
//!
//! fn set_count(state: &mut AppState, count: i32) {
//!     state.count = count;
//! }
//!
//! fn name(state: &AppState) -> &String {
//!     &state.name
//! }
//!
//! fn set_name(state: &mut AppState, name: String) {
//!     state.name = name;
//! }
//!
//! let app = combine_reducers::<AppState, AppAction>(vec![
//!     Box::new(scope_reducer("count", CounterReducer, count, set_count)),
//!     Box::new(scope_reducer("name", NameReducer, name, set_name)),
//! ]);
//!
//! let state = app.initial_state();
//! assert_eq!(state.name, "anonymous");
//!
//! let state = app.reduce(&state, &AppAction::Increment);
//! assert_eq!(state.count, 1);
//! ```

use crate::reducer::Reducer;

/// A named portion of an aggregate state `S`, reduced independently.
///
/// Slices are the unit of root composition: a [`CombinedReducer`] holds a
/// list of slices and asks each one to write its next value into the
/// aggregate. [`ScopedReducer`] is the standard implementation.
pub trait Slice<S, A>: Send + Sync {
    /// The slice name, used for logging
    fn name(&self) -> &'static str;

    /// Write this slice's initial value into `state`
    fn init_into(&self, state: &mut S);

    /// Reduce this slice of `previous` and write the result into `next`
    ///
    /// Implementations read only from `previous`, so the order in which
    /// slices run never affects what a slice observes.
    fn reduce_into(&self, previous: &S, next: &mut S, action: &A);
}

/// Scopes a reducer to operate on one named field of a larger state.
///
/// This allows you to reuse reducers designed for smaller state types
/// within a larger application state.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `R`: The child reducer; its `State` is the field type
///
/// # Examples
///
/// ```
/// use reflux_core::{Reducer, scope_reducer};
///
/// #[derive(Clone)]
/// enum CounterAction {
///     Add(i32),
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = i32;
///     type Action = CounterAction;
///
///     fn initial_state(&self) -> i32 {
///         0
///     }
///
///     fn reduce(&self, state: &i32, action: &CounterAction) -> i32 {
///         match action {
///             CounterAction::Add(n) => state + n,
///         }
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: i32,
///     other_data: String,
/// }
///
/// fn counter(app_state: &AppState) -> &i32 {
///     &app_state.counter
/// }
///
/// fn set_counter(app_state: &mut AppState, counter: i32) {
///     app_state.counter = counter;
/// }
///
/// let scoped = scope_reducer::<AppState, _>("counter", CounterReducer, counter, set_counter);
///
/// let state = AppState { counter: 1, other_data: "kept".to_string() };
/// let next = scoped.reduce(&state, &CounterAction::Add(2));
/// assert_eq!(next.counter, 3);
/// assert_eq!(next.other_data, "kept");
/// assert_eq!(state.counter, 1);
/// ```
pub fn scope_reducer<S, R>(
    name: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer {
        name,
        reducer,
        get_state,
        set_state,
    }
}

/// A scoped reducer that operates on one field of a parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    name: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
}

impl<S, R> ScopedReducer<S, R>
where
    R: Reducer,
{
    /// The slice name this reducer was scoped under
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The wrapped child reducer
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.reducer
    }
}

impl<S, R> std::fmt::Debug for ScopedReducer<S, R>
where
    R: Reducer,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    S: Clone + Default,
    R: Reducer,
{
    type State = S;
    type Action = R::Action;

    fn initial_state(&self) -> S {
        let mut state = S::default();
        (self.set_state)(&mut state, self.reducer.initial_state());
        state
    }

    fn reduce(&self, state: &S, action: &R::Action) -> S {
        let mut next = state.clone();
        let sub_state = self.reducer.reduce((self.get_state)(state), action);
        (self.set_state)(&mut next, sub_state);
        next
    }
}

impl<S, R> Slice<S, R::Action> for ScopedReducer<S, R>
where
    R: Reducer + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn init_into(&self, state: &mut S) {
        (self.set_state)(state, self.reducer.initial_state());
    }

    fn reduce_into(&self, previous: &S, next: &mut S, action: &R::Action) {
        let sub_state = self.reducer.reduce((self.get_state)(previous), action);
        (self.set_state)(next, sub_state);
    }
}

/// Boxed slice as stored by [`CombinedReducer`]
pub type BoxedSlice<S, A> = Box<dyn Slice<S, A>>;

/// Combines named slice reducers into a single reducer over the aggregate
/// state.
///
/// For every action, each slice reducer receives its own slice of the
/// previous state and the same action; the results are reassembled into a
/// new aggregate. The utility works for any list of slices and makes no
/// assumption about the shape of any one slice.
///
/// # Type Parameters
///
/// - `S`: The aggregate state type
/// - `A`: The action type shared by every slice
#[must_use]
pub fn combine_reducers<S, A>(slices: Vec<BoxedSlice<S, A>>) -> CombinedReducer<S, A> {
    CombinedReducer { slices }
}

/// The root reducer produced by [`combine_reducers`].
pub struct CombinedReducer<S, A> {
    slices: Vec<BoxedSlice<S, A>>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Create an empty combined reducer; add slices with [`Self::with_slice`]
    #[must_use]
    pub const fn new() -> Self {
        Self { slices: Vec::new() }
    }

    /// Add a slice
    #[must_use]
    pub fn with_slice<T>(mut self, slice: T) -> Self
    where
        T: Slice<S, A> + 'static,
    {
        self.slices.push(Box::new(slice));
        self
    }

    /// Names of the registered slices, in registration order
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        self.slices.iter().map(|slice| slice.name()).collect()
    }
}

impl<S, A> Default for CombinedReducer<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> std::fmt::Debug for CombinedReducer<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.slice_names())
            .finish()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Clone + Default,
{
    type State = S;
    type Action = A;

    fn initial_state(&self) -> S {
        let mut state = S::default();
        for slice in &self.slices {
            slice.init_into(&mut state);
        }
        state
    }

    fn reduce(&self, state: &S, action: &A) -> S {
        let mut next = state.clone();
        for slice in &self.slices {
            tracing::trace!(slice = slice.name(), "Reducing slice");
            slice.reduce_into(state, &mut next, action);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
        Noop,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = i32;
        type Action = TestAction;

        fn initial_state(&self) -> i32 {
            10
        }

        fn reduce(&self, state: &i32, action: &TestAction) -> i32 {
            match action {
                TestAction::Increment => state + 1,
                TestAction::Decrement => state - 1,
                TestAction::SetName(_) | TestAction::Noop => *state,
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = String;
        type Action = TestAction;

        fn initial_state(&self) -> String {
            "nobody".to_string()
        }

        fn reduce(&self, state: &String, action: &TestAction) -> String {
            if let TestAction::SetName(name) = action {
                name.clone()
            } else {
                state.clone()
            }
        }
    }

    fn counter(state: &TestState) -> &i32 {
        &state.counter
    }

    fn set_counter(state: &mut TestState, counter: i32) {
        state.counter = counter;
    }

    fn name(state: &TestState) -> &String {
        &state.name
    }

    fn set_name(state: &mut TestState, name: String) {
        state.name = name;
    }

    fn app() -> CombinedReducer<TestState, TestAction> {
        CombinedReducer::new()
            .with_slice(scope_reducer("counter", CounterReducer, counter, set_counter))
            .with_slice(scope_reducer("name", NameReducer, name, set_name))
    }

    #[test]
    fn test_combine_reducers() {
        let combined = app();
        let state = TestState::default();

        let state = combined.reduce(&state, &TestAction::Increment);
        assert_eq!(state.counter, 1);

        let state = combined.reduce(&state, &TestAction::SetName("Alice".to_string()));
        assert_eq!(state.name, "Alice");

        let state = combined.reduce(&state, &TestAction::Decrement);
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[test]
    fn test_initial_state_uses_slice_defaults() {
        let state = app().initial_state();
        assert_eq!(
            state,
            TestState {
                counter: 10,
                name: "nobody".to_string(),
            }
        );
    }

    #[test]
    fn test_combine_reducers_does_not_mutate_input() {
        let before = TestState {
            counter: 3,
            name: "Bob".to_string(),
        };
        let snapshot = before.clone();
        let _ = app().reduce(&before, &TestAction::Increment);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_vec_constructor_matches_builder() {
        let from_vec = combine_reducers::<TestState, TestAction>(vec![
            Box::new(scope_reducer("counter", CounterReducer, counter, set_counter)),
            Box::new(scope_reducer("name", NameReducer, name, set_name)),
        ]);
        assert_eq!(from_vec.slice_names(), vec!["counter", "name"]);
        assert_eq!(app().slice_names(), from_vec.slice_names());
    }

    #[test]
    fn test_empty_combination_is_identity() {
        let empty: CombinedReducer<TestState, TestAction> = CombinedReducer::new();
        let state = TestState {
            counter: 7,
            name: "x".to_string(),
        };
        assert_eq!(empty.reduce(&state, &TestAction::Increment), state);
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scope_reducer("counter", CounterReducer, counter, set_counter);
        assert_eq!(scoped.name(), "counter");

        let state = TestState {
            counter: 5,
            name: "test".to_string(),
        };

        let next = scoped.reduce(&state, &TestAction::Increment);
        assert_eq!(next.counter, 6);
        assert_eq!(next.name, "test");

        assert_eq!(scoped.initial_state().counter, 10);
        assert_eq!(scoped.initial_state().name, "");
    }

    fn arb_action() -> impl Strategy<Value = TestAction> {
        prop_oneof![
            Just(TestAction::Increment),
            Just(TestAction::Decrement),
            Just(TestAction::Noop),
            "[a-z]{0,8}".prop_map(TestAction::SetName),
        ]
    }

    proptest! {
        #[test]
        fn prop_composition_delegates_per_slice(
            count in -1000i32..1000,
            label in "[a-z]{0,8}",
            action in arb_action(),
        ) {
            let state = TestState { counter: count, name: label };
            let next = app().reduce(&state, &action);
            prop_assert_eq!(next.counter, CounterReducer.reduce(&state.counter, &action));
            prop_assert_eq!(next.name, NameReducer.reduce(&state.name, &action));
        }
    }
}
