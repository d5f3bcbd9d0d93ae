//! HTTP request parsing and representation.

use std::collections::HashMap;

use crate::parser::error::Error;
use crate::parser::method::Method;

/// Protocol version assumed when the request line carries none.
pub const DEFAULT_VERSION: &str = "2.0";

/// Represents an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method (GET, OPTIONS, ...)
    pub method: Method,
    /// The request target exactly as sent, without any decoding
    pub uri: Vec<u8>,
    /// The protocol version token, or [`DEFAULT_VERSION`]
    pub version: String,
    /// The HTTP headers. Header lines are not interpreted, so this is empty
    /// for every parsed request.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with no headers.
    pub fn new(method: Method, uri: impl Into<Vec<u8>>, version: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: version.into(),
            headers: HashMap::new(),
        }
    }

    /// The request target for display, with invalid UTF-8 replaced.
    pub fn uri_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.uri)
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }
}

/// Returns the bytes before the first `\r\n`, or the whole input if there is none.
fn request_line(input: &[u8]) -> &[u8] {
    input
        .windows(2)
        .position(|w| w == b"\r\n")
        .map_or(input, |end| &input[..end])
}

/// Parse an HTTP request from a byte slice.
///
/// Only the request line is interpreted. It is split on single spaces into
/// `<method> <uri> [<version>]`; anything after the third token and every
/// following line is ignored. The target is kept as raw bytes, so it may
/// contain anything but a space or `\r\n`.
///
/// # Errors
///
/// * [`Error::EmptyRequest`] if `input` is empty
/// * [`Error::MalformedRequest`] if the method token is empty or not UTF-8,
///   or the target is missing
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let line = request_line(input);
    let malformed = || Error::MalformedRequest(String::from_utf8_lossy(line).into_owned());

    let mut words = line.split(|b| *b == b' ');

    let method = match words.next() {
        Some(token) if !token.is_empty() => token,
        _ => return Err(malformed()),
    };
    let method = match std::str::from_utf8(method) {
        Ok(method) => method,
        Err(_) => return Err(Error::MalformedRequest("Invalid UTF-8".to_string())),
    };

    let uri = match words.next() {
        Some(uri) => uri,
        None => return Err(malformed()),
    };

    let version = match words.next() {
        Some(version) if !version.is_empty() => String::from_utf8_lossy(version).into_owned(),
        _ => DEFAULT_VERSION.to_string(),
    };

    Ok(HttpRequest::new(Method::from(method), uri, version))
}
