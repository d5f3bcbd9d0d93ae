//! HTTP parser module.
//!
//! This module turns raw bytes read from a connection into an [`HttpRequest`],
//! and turns a serialized response back into a [`ParsedResponse`].

mod request;
mod response;
mod method;
mod error;
mod tests;

// Re-export public items
pub use request::{HttpRequest, DEFAULT_VERSION};
pub use response::ParsedResponse;
pub use method::Method;
pub use error::Error;

// Re-export the parse functions
pub use request::parse_request;
pub use response::parse_response;
