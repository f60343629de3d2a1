//! Error types for the to-do application.

use reflux_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced at the edges of the application: decoding actions,
/// parsing prompt commands and writing the view.
///
/// Reducers never fail; none of these originate inside a reducer.
#[derive(Error, Debug)]
pub enum TodoError {
    /// A visibility filter name outside `SHOW_ALL`, `SHOW_ACTIVE`, `SHOW_COMPLETED`
    #[error("Unknown visibility filter: {0}")]
    UnknownFilter(String),

    /// An action or state could not be (de)serialized
    #[error("Failed to decode action: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store rejected an action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A prompt command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// One of the built-in reducer self-checks did not hold
    #[error("Self-check failed: {0}")]
    SelfCheckFailed(&'static str),
}
