//! Error types for Lumen
//!
//! Provides standardized error handling across the engine. Per-source
//! failures never surface from [`QueryEngine::resolve`](crate::QueryEngine::resolve);
//! these errors are what the internals return before being degraded to
//! "no result".

use thiserror::Error;

/// Errors that can occur in Lumen
#[derive(Debug, Error)]
pub enum LumenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Launch errors (failed to start an app, command or opener)
    #[error("Launch error: {0}")]
    Launch(String),

    /// A network lookup ran past its budget
    #[error("Timed out after {0} ms")]
    Timeout(u64),

    /// A network response did not have the expected shape
    #[error("Unexpected response: {0}")]
    Response(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Lumen operations
pub type LumenResult<T> = Result<T, LumenError>;
