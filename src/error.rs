//! Crate-wide error type and result alias.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PitchsideError>;

/// All error categories the agent can produce.
#[derive(Debug, Error)]
pub enum PitchsideError {
    /// Missing or malformed configuration. Raised at startup, before any
    /// network traffic.
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider request or response failure.
    #[error("Provider error: {0}")]
    Provider(String),

    /// football-data.org request or response failure.
    #[error("Football API error: {0}")]
    Api(String),

    /// Tool argument or execution failure.
    #[error("Tool error: {0}")]
    Tool(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
