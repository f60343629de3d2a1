//! Metric names and descriptions for the Store runtime.
//!
//! The store records through the `metrics` facade; nothing is exported
//! unless the host application installs a recorder.
//!
//! # Example
//!
//! ```
//! // Describe every store metric once at startup, before installing a recorder.
//! reflux_runtime::metrics::register_metrics();
//! ```

use metrics::{Unit, describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions applied to a store
pub const DISPATCH_TOTAL: &str = "store.dispatch.total";

/// Actions queued behind an in-progress dispatch
pub const DISPATCH_QUEUED: &str = "store.dispatch.queued";

/// Actions rejected because the pending queue was full
pub const DISPATCH_REJECTED: &str = "store.dispatch.rejected";

/// Time spent inside the root reducer
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Observer invocations
pub const OBSERVERS_NOTIFIED: &str = "store.observers.notified";

/// Register descriptions for all store metrics.
pub fn register_metrics() {
    describe_counter!(DISPATCH_TOTAL, Unit::Count, "Actions applied to a store");
    describe_counter!(
        DISPATCH_QUEUED,
        Unit::Count,
        "Actions queued behind an in-progress dispatch"
    );
    describe_counter!(
        DISPATCH_REJECTED,
        Unit::Count,
        "Actions rejected because the pending queue was full"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent inside the root reducer"
    );
    describe_counter!(OBSERVERS_NOTIFIED, Unit::Count, "Observer invocations");
}
