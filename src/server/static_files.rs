//! Static file serving for GET requests.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use log::warn;

use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// Content type used when the extension is unknown or missing.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

const NOT_FOUND_BODY: &[u8] = b"<h1> 404 Not Found </h1>";
const FORBIDDEN_BODY: &[u8] = b"<h1> 403 Forbidden </h1>";

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request target to a path below the root.
    ///
    /// Leading and trailing slashes are stripped and the rest is taken as a
    /// relative path, byte for byte. Returns `None` if any `/`-separated
    /// segment is `.` or `..`, wherever it appears, or if the path has a
    /// root or drive prefix. Symlinks are not followed here; see
    /// [`StaticFiles::serve`].
    pub fn resolve(&self, uri: &[u8]) -> Option<PathBuf> {
        let relative = trim_slashes(uri);
        if relative
            .split(|b| *b == b'/')
            .any(|segment| segment == b"." || segment == b"..")
        {
            return None;
        }

        let relative = bytes_to_path(relative);
        if relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            Some(self.root.join(relative))
        } else {
            None
        }
    }

    /// Serve the file named by `uri`.
    ///
    /// Returns 200 with the file contents, 404 if nothing exists at the
    /// path, or 403 if the path escapes the root, either by name or because
    /// a symlink leads outside of it. A path that exists but cannot be read
    /// as a file (a directory, a permission problem) is an [`Error::IoError`].
    pub async fn serve(&self, uri: &[u8]) -> Result<HttpResponse, Error> {
        let path = match self.resolve(uri) {
            Some(path) => path,
            None => {
                warn!("Refusing path outside of the serving root: {uri}", uri = String::from_utf8_lossy(uri));
                return Ok(forbidden());
            }
        };

        // An empty target names the root itself, which is never a file
        if trim_slashes(uri).is_empty() {
            return Ok(not_found());
        }

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Ok(not_found()),
            // A name the OS cannot represent, such as one with a NUL byte
            Err(e) if e.kind() == ErrorKind::InvalidInput => return Ok(not_found()),
            Err(e) => return Err(Error::IoError(e)),
        }

        if !self.is_inside_root(&path).await? {
            warn!("Refusing path that leaves the serving root: {path}", path = path.display());
            return Ok(forbidden());
        }

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(not_found()),
            Err(e) => return Err(Error::IoError(e)),
        };

        Ok(HttpResponse::new(StatusCode::OK)
            .with_content_type(guess_content_type(&path))
            .with_body(body))
    }

    /// Whether `path`, with every symlink resolved, is still below the root.
    async fn is_inside_root(&self, path: &Path) -> Result<bool, Error> {
        let root = tokio::fs::canonicalize(&self.root).await?;
        let target = tokio::fs::canonicalize(path).await?;
        Ok(target.starts_with(&root) && target != root)
    }
}

fn trim_slashes(uri: &[u8]) -> &[u8] {
    let start = uri.iter().position(|b| *b != b'/').unwrap_or(uri.len());
    let end = uri.iter().rposition(|b| *b != b'/').map_or(start, |i| i + 1);
    &uri[start..end]
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn not_found() -> HttpResponse {
    HttpResponse::new(StatusCode::NOT_FOUND).with_body(NOT_FOUND_BODY)
}

fn forbidden() -> HttpResponse {
    HttpResponse::new(StatusCode::FORBIDDEN).with_body(FORBIDDEN_BODY)
}

/// Guess a content type from the file extension, falling back to
/// [`DEFAULT_CONTENT_TYPE`].
pub fn guess_content_type(path: &Path) -> &'static str {
    let extension = match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => extension.to_ascii_lowercase(),
        None => return DEFAULT_CONTENT_TYPE,
    };

    match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "txt" | "text" | "log" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "xml" => "text/xml",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "mp3" => "audio/mpeg",
        "wav" => "audio/x-wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
