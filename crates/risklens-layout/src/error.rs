//! Error types for layout operations

use thiserror::Error;

/// Errors that can occur around the layout simulation
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker task is no longer running
    #[error("Layout worker has stopped")]
    Stopped,

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
