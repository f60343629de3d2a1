//! # Reflux Core
//!
//! Core traits for the reflux architecture.
//!
//! This crate provides the fundamental abstractions for building
//! unidirectional state management on top of pure reducers.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, or one slice of it
//! - **Action**: An immutable tagged value describing an intended transition
//! - **Reducer**: Pure function `(State, Action) → State`
//! - **Slice**: A named, independently reduced field of an aggregate state
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Reducers never mutate their input, they return the next value
//! - Unrecognised actions are an identity transform
//!
//! ## Example
//!
//! ```
//! use reflux_core::Reducer;
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Other,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i64;
//!     type Action = CounterAction;
//!
//!     fn initial_state(&self) -> i64 {
//!         0
//!     }
//!
//!     fn reduce(&self, state: &i64, action: &CounterAction) -> i64 {
//!         match action {
//!             CounterAction::Increment => state + 1,
//!             CounterAction::Other => *state,
//!         }
//!     }
//! }
//!
//! let reducer = CounterReducer;
//! let next = reducer.reduce(&reducer.initial_state(), &CounterAction::Increment);
//! assert_eq!(next, 1);
//! ```

/// Reducer composition utilities (slice scoping and root composition)
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`.
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or slice of state) this reducer produces
    /// - `Action`: The action type this reducer processes
    ///
    /// # Contract
    ///
    /// - `reduce` never mutates `state`; it returns the next value.
    /// - An action the reducer does not recognise yields a value equal to
    ///   `state`.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The value of this state when no previous value exists
        fn initial_state(&self) -> Self::State;

        /// Reduce an action into the next state
        ///
        /// # Arguments
        ///
        /// - `state`: The previous state
        /// - `action`: The action to process
        ///
        /// # Returns
        ///
        /// The next state
        fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;
    }

    impl<R> Reducer for Box<R>
    where
        R: Reducer + ?Sized,
    {
        type State = R::State;
        type Action = R::Action;

        fn initial_state(&self) -> Self::State {
            (**self).initial_state()
        }

        fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State {
            (**self).reduce(state, action)
        }
    }

    impl<R> Reducer for std::sync::Arc<R>
    where
        R: Reducer + ?Sized,
    {
        type State = R::State;
        type Action = R::Action;

        fn initial_state(&self) -> Self::State {
            (**self).initial_state()
        }

        fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State {
            (**self).reduce(state, action)
        }
    }
}

// Re-export commonly used types
pub use composition::{
    BoxedSlice, CombinedReducer, ScopedReducer, Slice, combine_reducers, scope_reducer,
};
pub use reducer::Reducer;
