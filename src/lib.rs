//! A minimal HTTP server that serves static files.
//!
//! Flying Potato accepts a TCP connection, reads the request once, answers
//! it and closes the connection. It understands two methods: `GET` serves
//! files from a root directory and `OPTIONS` lists the supported methods.
//! Every other method is answered with `501 Not Implemented`.
//!
//! # Features
//!
//! - Parse HTTP request lines from byte slices
//! - Serialize responses with a `Server` header merged under handler headers
//! - Static file serving with content-type guessing and path traversal protection
//! - Parse serialized responses back, for clients and tests
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use flying_potato::{parse_request, Method};
//!
//! let request = parse_request(b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.uri, b"/index.html");
//! assert_eq!(request.version, "HTTP/1.1");
//! ```
//!
//! ## Building a response
//!
//! ```
//! use flying_potato::{HttpResponse, StatusCode};
//!
//! let response = HttpResponse::new(StatusCode::OK);
//! assert_eq!(response.to_bytes(), b"HTTP/2.0 200 OK\r\nServer: Flying Potato\r\n\r\n");
//!
//! // Only registered status codes can be used
//! assert!(HttpResponse::from_code(299).is_err());
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use flying_potato::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), flying_potato::ServerError> {
//! let server = HttpServer::new(ServerConfig::default());
//! server.start().await?;
//! # Ok(())
//! # }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, ParsedResponse, parse_request, parse_response};
pub use server::{Error as ServerError, Dispatcher, HttpResponse, HttpServer, ServerConfig, StatusCode};
