//! Error types for domain construction

use thiserror::Error;

/// Errors raised when a record would violate a domain invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Likelihood or impact outside the 1-5 scale
    #[error("{field} must be between 1 and 5, got {value}")]
    OutOfRange {
        /// Which factor was rejected
        field: &'static str,
        /// The rejected value
        value: u8,
    },

    /// A serialized score that is not likelihood × impact
    #[error("score {score} does not equal likelihood {likelihood} × impact {impact}")]
    ScoreMismatch {
        /// Serialized likelihood
        likelihood: u8,
        /// Serialized impact
        impact: u8,
        /// Serialized score
        score: u8,
    },

    /// Unknown business unit name
    #[error("Unknown business unit: {0}")]
    UnknownBusinessUnit(String),

    /// Unknown record kind
    #[error("Unknown risk kind: {0}")]
    UnknownKind(String),
}
