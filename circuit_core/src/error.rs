//! Error types for the circuit_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for circuit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workout definition violates its invariants
    #[error("Invalid workout definition: {0}")]
    InvalidDefinition(String),

    /// Feedback score outside 1..=10
    #[error("Invalid feedback {0}: expected a score from 1 to 10")]
    InvalidFeedback(i64),

    /// Persisted workout document could not be normalized
    #[error("Wire format error: {0}")]
    Wire(String),

    /// No workout with the requested id
    #[error("Workout not found: {0}")]
    NotFound(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
