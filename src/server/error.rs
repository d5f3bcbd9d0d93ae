//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// A response was requested with a status code that has no reason phrase.
    #[error("Unknown status code: {0}")]
    UnknownStatusCode(u16),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid server configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization error while loading a configuration file.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
