//! Parsing of serialized HTTP responses.
//!
//! The server never reads responses itself; this is the inverse of
//! `HttpResponse::to_bytes` and is what clients and tests use to inspect
//! what went over the wire.

use crate::parser::error::Error;

/// A response read back from its wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// The version from the status line, without the `HTTP/` prefix
    pub version: String,
    /// The numeric status code
    pub status: u16,
    /// The reason phrase, which may contain spaces
    pub reason: String,
    /// The headers in the order they were sent
    pub headers: Vec<(String, String)>,
    /// Everything after the blank line
    pub body: Vec<u8>,
}

impl ParsedResponse {
    /// Get a header value (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a serialized HTTP response.
///
/// The body is whatever follows the first blank line; since responses are
/// close-delimited there is no length to check it against.
pub fn parse_response(input: &[u8]) -> Result<ParsedResponse, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, body) = match input.windows(4).position(|w| w == b"\r\n\r\n") {
        Some(end) => (&input[..end], &input[end + 4..]),
        None => return Err(Error::MalformedStatusLine("missing blank line".to_string())),
    };

    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedStatusLine("Invalid UTF-8".to_string()))?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.splitn(3, ' ');

    let version = match parts.next().and_then(|v| v.strip_prefix("HTTP/")) {
        Some(version) if !version.is_empty() => version.to_string(),
        _ => return Err(Error::MalformedStatusLine(status_line.to_string())),
    };

    let status = match parts.next() {
        Some(code) if code.len() == 3 => code
            .parse::<u16>()
            .map_err(|_| Error::InvalidStatusCode(code.to_string()))?,
        Some(code) => return Err(Error::InvalidStatusCode(code.to_string())),
        None => return Err(Error::MalformedStatusLine(status_line.to_string())),
    };

    let reason = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeaderFormat(line.to_string()))?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    Ok(ParsedResponse {
        version,
        status,
        reason,
        headers,
        body: body.to_vec(),
    })
}
