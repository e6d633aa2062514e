//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] risklens_domain::DomainError),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(#[from] risklens_analysis::AnalysisError),

    /// Layout error
    #[error("Layout error: {0}")]
    Layout(#[from] risklens_layout::LayoutError),

    /// Interview error
    #[error("Interview error: {0}")]
    Interview(#[from] risklens_interview::InterviewError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found in the register
    #[error("No record with id '{0}'")]
    NotFound(String),
}
