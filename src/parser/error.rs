//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while parsing HTTP messages.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contained no bytes at all.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line is missing its method or target, or is not UTF-8.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The status line of a response does not have the `HTTP/<version> <code> <reason>` shape.
    #[error("Malformed status line: {0}")]
    MalformedStatusLine(String),

    /// The status code of a response is not a three-digit number.
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    /// A header line has no `:` separator.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),
}
