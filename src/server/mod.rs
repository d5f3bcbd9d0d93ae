//! HTTP server implementation for flying-potato.
//!
//! This module accepts connections, dispatches parsed requests to the
//! handler for their method, and writes serialized responses back.

mod response;
mod config;
mod error;
mod handler;
mod static_files;
mod http_server;

// Re-export public items
pub use response::{Headers, HttpResponse, StatusCode, SERVER_NAME};
pub use config::{ServerConfig, CONFIG_ENV, HOST_ENV, PORT_ENV, ROOT_ENV};
pub use error::Error;
pub use handler::{Dispatcher, MethodHandler, ALLOWED_METHODS};
pub use static_files::{guess_content_type, StaticFiles, DEFAULT_CONTENT_TYPE};
pub use http_server::HttpServer;
