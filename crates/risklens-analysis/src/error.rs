//! Error types for analysis operations
//!
//! The analytical functions themselves never fail; these errors cover
//! configuration and the notification seam.

use thiserror::Error;

/// Errors that can occur around the analysis engine
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notifier delivery error
    #[error("Notifier error: {0}")]
    Notifier(String),
}
