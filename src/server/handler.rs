//! Method dispatch.

use log::debug;

use crate::parser::{HttpRequest, Method};
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::static_files::StaticFiles;

/// Value of the `Allow` header advertised by OPTIONS.
pub const ALLOWED_METHODS: &str = "OPTIONS, GET";

const NOT_IMPLEMENTED_BODY: &[u8] = b"<h1>501 Not Implemented</h1>";

/// The handlers the server knows about, one per supported method.
///
/// Supporting another method means adding a variant here and a match arm in
/// [`MethodHandler::for_method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodHandler {
    /// Answers OPTIONS with the list of supported methods.
    Options,
    /// Serves static files for GET.
    Get,
}

impl MethodHandler {
    /// Resolve the handler for a method, if there is one.
    pub fn for_method(method: &Method) -> Option<Self> {
        match method {
            Method::OPTIONS => Some(MethodHandler::Options),
            Method::GET => Some(MethodHandler::Get),
            Method::Other(_) => None,
        }
    }
}

/// Routes a parsed request to the handler for its method.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    static_files: StaticFiles,
}

impl Dispatcher {
    pub fn new(static_files: StaticFiles) -> Self {
        Self { static_files }
    }

    pub fn static_files(&self) -> &StaticFiles {
        &self.static_files
    }

    /// Produce the response for a request.
    ///
    /// A method without a handler yields `501 Not Implemented`. Errors are
    /// only returned for conditions that should fail the request internally,
    /// such as a file that exists but cannot be read.
    pub async fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        match MethodHandler::for_method(&request.method) {
            Some(MethodHandler::Options) => {
                debug!("OPTIONS {uri}", uri = request.uri_lossy());
                Ok(options())
            }
            Some(MethodHandler::Get) => {
                debug!("GET {uri}", uri = request.uri_lossy());
                self.static_files.serve(&request.uri).await
            }
            None => {
                debug!("No handler for method {method}", method = request.method);
                Ok(not_implemented())
            }
        }
    }
}

fn options() -> HttpResponse {
    HttpResponse::new(StatusCode::OK).with_header("Allow", ALLOWED_METHODS)
}

fn not_implemented() -> HttpResponse {
    HttpResponse::new(StatusCode::NOT_IMPLEMENTED).with_body(NOT_IMPLEMENTED_BODY)
}
