//! # Reflux Testing
//!
//! Testing utilities and helpers for the reflux architecture.
//!
//! This crate provides:
//! - `ReducerTest`, a Given-When-Then harness for reducers
//! - Assertion helpers for reducer laws (identity, purity)
//! - Observer mocks that record store notifications
//! - Test tracing setup
//!
//! ## Example
//!
//! ```ignore
//! use reflux_runtime::Store;
//! use reflux_testing::mocks::StateRecorder;
//!
//! #[test]
//! fn test_todo_flow() {
//!     let store = Store::new(todo_app());
//!     let recorder = StateRecorder::attach(&store);
//!
//!     store.dispatch(TodoAction::add(0, "Learn Redux")).unwrap();
//!
//!     assert_eq!(recorder.states().len(), 1);
//! }
//! ```


/// Mock observers for store tests
pub mod mocks {
    use parking_lot::Mutex;
    use reflux_core::Reducer;
    use reflux_runtime::{Store, Subscription};
    use std::sync::Arc;

    /// Records labelled observer invocations, in call order
    ///
    /// # Example
    ///
    /// ```
    /// use reflux_testing::mocks::ObserverLog;
    ///
    /// let log = ObserverLog::new();
    /// let first = log.observer("first");
    /// let second = log.observer("second");
    /// first();
    /// second();
    /// assert_eq!(log.calls(), vec!["first", "second"]);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct ObserverLog {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ObserverLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// An observer that appends `label` to the log when called
        #[must_use]
        pub fn observer(&self, label: &'static str) -> impl Fn() + Send + Sync + 'static {
            let calls = Arc::clone(&self.calls);
            move || calls.lock().push(label)
        }

        /// Labels recorded so far
        #[must_use]
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().clone()
        }

        /// Number of calls recorded for `label`
        #[must_use]
        pub fn count(&self, label: &str) -> usize {
            self.calls.lock().iter().filter(|l| **l == label).count()
        }

        /// Forget recorded calls
        pub fn clear(&self) {
            self.calls.lock().clear();
        }
    }

    /// Observer that snapshots the store state on every publish
    pub struct StateRecorder<S> {
        states: Arc<Mutex<Vec<S>>>,
        subscription: Subscription,
    }

    impl<S> StateRecorder<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        /// Subscribe a recorder to `store`
        ///
        /// The recorder holds only a weak handle to the store.
        #[must_use]
        pub fn attach<R>(store: &Store<R>) -> Self
        where
            R: Reducer<State = S> + Send + Sync + 'static,
            R::Action: Send,
        {
            let states = Arc::new(Mutex::new(Vec::new()));
            let weak = store.downgrade();
            let sink = Arc::clone(&states);
            let subscription = store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    sink.lock().push(store.get_state());
                }
            });
            Self {
                states,
                subscription,
            }
        }

        /// States observed so far, one per publish
        #[must_use]
        pub fn states(&self) -> Vec<S> {
            self.states.lock().clone()
        }

        /// The most recently observed state
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.states.lock().last().cloned()
        }

        /// Stop recording; returns the states observed
        pub fn detach(self) -> Vec<S> {
            self.subscription.unsubscribe();
            self.states.lock().clone()
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a tracing subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG`. Safe to call from every test; only the first call
    /// installs a subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{ObserverLog, StateRecorder};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reflux_core::Reducer;
    use reflux_runtime::Store;

    struct Counter;

    impl Reducer for Counter {
        type State = u32;
        type Action = u32;

        fn initial_state(&self) -> u32 {
            0
        }

        fn reduce(&self, state: &u32, action: &u32) -> u32 {
            state + action
        }
    }

    #[test]
    fn test_observer_log_counts() {
        let log = ObserverLog::new();
        let a = log.observer("a");
        a();
        a();
        assert_eq!(log.count("a"), 2);
        assert_eq!(log.count("b"), 0);
        log.clear();
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_state_recorder() {
        init_test_tracing();
        let store = Store::new(Counter);
        let recorder = StateRecorder::attach(&store);

        store.dispatch(2).unwrap();
        store.dispatch(3).unwrap();
        assert_eq!(recorder.last(), Some(5));

        let states = recorder.detach();
        assert_eq!(states, vec![2, 5]);

        store.dispatch(1).unwrap();
        assert_eq!(store.observer_count(), 0);
    }
}
