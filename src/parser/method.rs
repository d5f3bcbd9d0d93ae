//! HTTP request methods.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The method token of a request line.
///
/// Only the methods the server has handlers for get their own variant. Any
/// other token is kept verbatim in [`Method::Other`] so that it can still be
/// answered with `501 Not Implemented`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// OPTIONS method: Describes the communication options for the target resource.
    OPTIONS,
    /// Any other token, matched case-sensitively (`get` is not `GET`).
    Other(String),
}

impl From<&str> for Method {
    fn from(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Other(other.to_string()),
        }
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::OPTIONS => write!(f, "OPTIONS"),
            Method::Other(token) => write!(f, "{token}"),
        }
    }
}
