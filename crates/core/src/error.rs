//! Error types for the rankprep domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all rankprep operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Component errors ---
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    // --- Batch errors ---
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("Component not registered: {0}")]
    NotFound(String),

    #[error("Invalid options for {component}: {reason}")]
    InvalidOptions { component: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("Batch length mismatch: {utterances} utterances vs {histories} histories")]
    LengthMismatch { utterances: usize, histories: usize },
}
