//! Error types for motif-core

use thiserror::Error;

/// Errors raised by detection and its collaborators.
///
/// Finding no eligible candidate is not an error; searches return `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    /// Invalid finder configuration (lengths, slack, duration window, policy)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The event sequence has no events
    #[error("Empty input: the event sequence has no events")]
    EmptyInput,

    /// Malformed event notation
    #[error("Notation error: {0}")]
    Notation(String),

    /// Failure reported by a harmonizer implementation
    #[error("Harmonization error: {0}")]
    Harmonization(String),
}

/// Convenience Result type using DetectError
pub type Result<T> = std::result::Result<T, DetectError>;
