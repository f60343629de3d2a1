//! # Reflux Runtime
//!
//! Runtime implementation for the reflux architecture.
//!
//! This crate provides the Store that owns aggregate state, applies actions
//! through a root reducer and notifies observers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the current state and mediates dispatch and observers
//! - **Subscription**: Handle returned by `subscribe`, used to unsubscribe
//! - **`StoreConfig`**: Tunables for the dispatch queue
//!
//! ## Example
//!
//! ```
//! use reflux_core::Reducer;
//! use reflux_runtime::Store;
//!
//! struct Counter;
//!
//! impl Reducer for Counter {
//!     type State = u32;
//!     type Action = u32;
//!
//!     fn initial_state(&self) -> u32 {
//!         0
//!     }
//!
//!     fn reduce(&self, state: &u32, action: &u32) -> u32 {
//!         state + action
//!     }
//! }
//!
//! let store = Store::new(Counter);
//! let _subscription = store.subscribe(|| println!("state changed"));
//!
//! store.dispatch(5).ok();
//! assert_eq!(store.get_state(), 5);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Metric names recorded by the store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// An action was dispatched while another dispatch was in progress
        /// and the pending queue already held `capacity` actions.
        ///
        /// The rejected action is dropped; the in-progress dispatch is
        /// unaffected.
        #[error("Dispatch queue is full ({capacity} pending actions)")]
        QueueFull {
            /// Configured maximum number of pending actions
            capacity: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use reflux_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_pending_actions(16);
/// assert_eq!(config.max_pending_actions, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions that may wait behind an in-progress
    /// dispatch (actions dispatched from observers or other threads)
    pub max_pending_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_pending_actions: usize) -> Self {
        Self {
            max_pending_actions,
        }
    }

    /// Set the maximum number of pending actions
    #[must_use]
    pub const fn with_max_pending_actions(mut self, max_pending_actions: usize) -> Self {
        self.max_pending_actions = max_pending_actions;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_pending_actions: 1024,
        }
    }
}

/// Internal: resets the dispatch flag if an observer or reducer panics
///
/// Without this, a panic mid-dispatch would leave the store believing a
/// dispatch is still running and every later action would be queued forever.
struct DispatchGuard<'a, A> {
    queue: &'a parking_lot::Mutex<store::DispatchQueue<A>>,
    aborted: &'a AtomicBool,
}

impl<A> Drop for DispatchGuard<'_, A> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut queue = self.queue.lock();
            let dropped = queue.pending.len();
            queue.pending.clear();
            queue.dispatching = false;
            self.aborted.store(true, Ordering::Release);
            tracing::error!(dropped, "Dispatch aborted by panic, pending actions dropped");
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::metrics::{
        DISPATCH_QUEUED, DISPATCH_REJECTED, DISPATCH_TOTAL, OBSERVERS_NOTIFIED, REDUCER_DURATION,
    };
    use super::{AtomicBool, DispatchGuard, Ordering, StoreConfig, StoreError};
    use parking_lot::{Mutex, RwLock};
    use reflux_core::Reducer;
    use std::collections::VecDeque;
    use std::sync::{Arc, Weak};

    /// A registered observer: a zero-argument callback
    pub type Observer = Arc<dyn Fn() + Send + Sync>;

    /// Identifier of a registered observer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SubscriptionId(u64);

    impl std::fmt::Display for SubscriptionId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sub-{}", self.0)
        }
    }

    #[derive(Default)]
    struct Observers {
        next_id: u64,
        entries: Vec<(SubscriptionId, Observer)>,
    }

    pub(crate) struct DispatchQueue<A> {
        pub(crate) dispatching: bool,
        pub(crate) pending: VecDeque<A>,
    }

    struct Shared<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: RwLock<R::State>,
        observers: Arc<Mutex<Observers>>,
        queue: Mutex<DispatchQueue<R::Action>>,
        aborted: AtomicBool,
        config: StoreConfig,
    }

    /// The Store - single owner of the aggregate state
    ///
    /// The Store manages:
    /// 1. State (behind a lock, replaced wholesale on every dispatch)
    /// 2. Reducer (business logic, usually a `CombinedReducer`)
    /// 3. Observers (notified after every committed state transition)
    ///
    /// A `Store` is a cheap handle: clones share the same state. Independent
    /// stores are independent values; there is no global instance.
    ///
    /// # Dispatch semantics
    ///
    /// `dispatch` is synchronous. The next state is computed and committed,
    /// then every observer registered at that moment is called once, in
    /// registration order. An action dispatched while a dispatch is running
    /// (from an observer, or from another thread) is queued and applied by
    /// the running dispatch after the current publish step, each queued
    /// action getting its own commit and publish.
    pub struct Store<R>
    where
        R: Reducer,
    {
        shared: Arc<Shared<R>>,
    }

    impl<R> Clone for Store<R>
    where
        R: Reducer,
    {
        fn clone(&self) -> Self {
            Self {
                shared: Arc::clone(&self.shared),
            }
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &*self.shared.state.read())
                .field("observers", &self.shared.observers.lock().entries.len())
                .field("config", &self.shared.config)
                .finish()
        }
    }

    impl<R> Store<R>
    where
        R: Reducer,
    {
        /// Create a new store whose state is the reducer's initial state
        ///
        /// Equivalent to running the root reducer once on an absent state,
        /// which yields every slice's default.
        #[must_use]
        pub fn new(reducer: R) -> Self {
            Self::with_config(reducer, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(reducer: R, config: StoreConfig) -> Self {
            let initial_state = reducer.initial_state();
            Self::build(reducer, initial_state, config)
        }

        /// Create a new store preloaded with `state` instead of the
        /// reducer's initial state
        #[must_use]
        pub fn with_state(reducer: R, state: R::State) -> Self {
            Self::build(reducer, state, StoreConfig::default())
        }

        fn build(reducer: R, state: R::State, config: StoreConfig) -> Self {
            tracing::debug!(?config, "Creating store");
            Self {
                shared: Arc::new(Shared {
                    reducer,
                    state: RwLock::new(state),
                    observers: Arc::new(Mutex::new(Observers::default())),
                    queue: Mutex::new(DispatchQueue {
                        dispatching: false,
                        pending: VecDeque::new(),
                    }),
                    aborted: AtomicBool::new(false),
                    config,
                }),
            }
        }

        /// The store configuration
        #[must_use]
        pub fn config(&self) -> &StoreConfig {
            &self.shared.config
        }

        /// The root reducer
        #[must_use]
        pub fn reducer(&self) -> &R {
            &self.shared.reducer
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let state = self.shared.state.read();
            f(&state)
        }

        /// Snapshot of the current state
        #[must_use]
        pub fn get_state(&self) -> R::State
        where
            R::State: Clone,
        {
            self.shared.state.read().clone()
        }

        /// Whether an earlier dispatch was aborted by a panicking reducer or
        /// observer
        #[must_use]
        pub fn was_aborted(&self) -> bool {
            self.shared.aborted.load(Ordering::Acquire)
        }

        /// Register an observer, called with no arguments after every
        /// dispatch
        ///
        /// Registering the same callback twice registers it twice. The
        /// returned [`Subscription`] removes the observer when
        /// [`Subscription::unsubscribe`] is called; dropping it keeps the
        /// observer registered.
        pub fn subscribe<F>(&self, observer: F) -> Subscription
        where
            F: Fn() + Send + Sync + 'static,
        {
            let mut observers = self.shared.observers.lock();
            let id = SubscriptionId(observers.next_id);
            observers.next_id += 1;
            observers.entries.push((id, Arc::new(observer)));
            tracing::trace!(%id, total = observers.entries.len(), "Observer subscribed");

            Subscription {
                id,
                observers: Arc::downgrade(&self.shared.observers),
            }
        }

        /// Number of registered observers
        #[must_use]
        pub fn observer_count(&self) -> usize {
            self.shared.observers.lock().entries.len()
        }

        /// Create a weak handle, for observers that need to dispatch without
        /// keeping the store alive
        #[must_use]
        pub fn downgrade(&self) -> WeakStore<R> {
            WeakStore {
                shared: Arc::downgrade(&self.shared),
            }
        }

        /// Apply an action and notify observers
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::QueueFull`] if a dispatch is already in
        /// progress and `max_pending_actions` actions are already waiting.
        #[tracing::instrument(skip_all, name = "store_dispatch")]
        pub fn dispatch(&self, action: R::Action) -> Result<(), StoreError> {
            {
                let mut queue = self.shared.queue.lock();
                if queue.dispatching {
                    let capacity = self.shared.config.max_pending_actions;
                    if queue.pending.len() >= capacity {
                        tracing::warn!(capacity, "Rejected action: dispatch queue is full");
                        metrics::counter!(DISPATCH_REJECTED).increment(1);
                        return Err(StoreError::QueueFull { capacity });
                    }
                    queue.pending.push_back(action);
                    tracing::trace!(
                        pending = queue.pending.len(),
                        "Queued action behind in-progress dispatch"
                    );
                    metrics::counter!(DISPATCH_QUEUED).increment(1);
                    return Ok(());
                }
                queue.dispatching = true;
            }

            let _guard = DispatchGuard {
                queue: &self.shared.queue,
                aborted: &self.shared.aborted,
            };

            let mut action = action;
            loop {
                self.commit(&action);
                self.publish();

                let mut queue = self.shared.queue.lock();
                if let Some(next) = queue.pending.pop_front() {
                    action = next;
                } else {
                    queue.dispatching = false;
                    break;
                }
            }

            Ok(())
        }

        fn commit(&self, action: &R::Action) {
            tracing::debug!("Processing action");
            metrics::counter!(DISPATCH_TOTAL).increment(1);

            let mut state = self.shared.state.write();
            let start = std::time::Instant::now();
            let next = self.shared.reducer.reduce(&state, action);
            metrics::histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());
            *state = next;
        }

        fn publish(&self) {
            // Snapshot so observers may subscribe or unsubscribe while being called.
            let observers: Vec<Observer> = self
                .shared
                .observers
                .lock()
                .entries
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();

            tracing::trace!(observers = observers.len(), "Publishing state change");
            for observer in &observers {
                observer();
            }
            metrics::counter!(OBSERVERS_NOTIFIED).increment(observers.len() as u64);
        }
    }

    /// Weak handle to a [`Store`], created by [`Store::downgrade`]
    pub struct WeakStore<R>
    where
        R: Reducer,
    {
        shared: Weak<Shared<R>>,
    }

    impl<R> Clone for WeakStore<R>
    where
        R: Reducer,
    {
        fn clone(&self) -> Self {
            Self {
                shared: Weak::clone(&self.shared),
            }
        }
    }

    impl<R> WeakStore<R>
    where
        R: Reducer,
    {
        /// Upgrade to a strong handle if the store is still alive
        #[must_use]
        pub fn upgrade(&self) -> Option<Store<R>> {
            self.shared.upgrade().map(|shared| Store { shared })
        }
    }

    /// Handle to a registered observer
    #[derive(Debug)]
    pub struct Subscription {
        id: SubscriptionId,
        observers: Weak<Mutex<Observers>>,
    }

    impl Subscription {
        /// Identifier of the observer
        #[must_use]
        pub const fn id(&self) -> SubscriptionId {
            self.id
        }

        /// Remove the observer from the store
        ///
        /// Returns `false` if the store no longer exists or the observer was
        /// already removed. A publish step already in progress still calls
        /// the observer; removal applies from the next publish.
        pub fn unsubscribe(self) -> bool {
            let Some(observers) = self.observers.upgrade() else {
                return false;
            };
            let mut observers = observers.lock();
            let before = observers.entries.len();
            observers.entries.retain(|(id, _)| *id != self.id);
            let removed = observers.entries.len() != before;
            tracing::trace!(id = %self.id, removed, "Observer unsubscribed");
            removed
        }
    }

    impl std::fmt::Debug for Observers {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Observers")
                .field("next_id", &self.next_id)
                .field("entries", &self.entries.len())
                .finish()
        }
    }
}

pub use store::{Observer, Store, Subscription, SubscriptionId, WeakStore};
