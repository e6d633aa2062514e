//! Interview error types

use risklens_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while conducting an interview
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterviewError {
    /// The question is not part of the selected flow
    #[error("Question '{question}' is not part of the {flow} flow")]
    UnknownQuestion {
        /// Question id
        question: &'static str,
        /// Selected flow
        flow: &'static str,
    },

    /// The answer has the wrong shape for the question
    #[error("Question '{question}' expects {expected}")]
    ShapeMismatch {
        /// Question id
        question: &'static str,
        /// What the question accepts
        expected: &'static str,
    },

    /// A choice value that the question does not offer
    #[error("'{value}' is not an option for question '{question}'")]
    UnknownOption {
        /// Question id
        question: &'static str,
        /// The rejected value
        value: String,
    },

    /// Numeric or free-text answer outside what the question accepts
    #[error("Invalid answer to '{question}': {reason}")]
    InvalidValue {
        /// Question id
        question: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Only optional questions can be skipped
    #[error("Question '{0}' needs an answer and cannot be skipped")]
    NotOptional(&'static str),

    /// Domain invariant violated while building the record
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
