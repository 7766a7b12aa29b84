//! Error types for paywatch-core.

use thiserror::Error;

/// Core error type.
///
/// Recorder failures are non-fatal by contract: a recorder that returns an
/// error has already logged the problem and dropped the event, and the
/// caller is free to ignore the result. Observability must never abort the
/// test run that produced an event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A recorder received a malformed event and dropped it.
    #[error("invalid event: {field} {reason}")]
    InvalidEvent {
        /// Offending event field.
        field: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
