//! Server configuration.
//!
//! Defaults reproduce the classic demo setup: `127.0.0.1:8888`, a backlog of
//! 5, a single 1024-byte read per connection, one connection at a time, and
//! files served from the working directory. Each value can be changed from a
//! JSON file or from environment variables.
//!
//! ```bash
//! FLYING_POTATO_CONFIG=potato.json FLYING_POTATO_PORT=9000 flying-potato
//! ```

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::server::error::Error;

/// Path of an optional JSON configuration file.
pub const CONFIG_ENV: &str = "FLYING_POTATO_CONFIG";
/// Overrides [`ServerConfig::host`].
pub const HOST_ENV: &str = "FLYING_POTATO_HOST";
/// Overrides [`ServerConfig::port`].
pub const PORT_ENV: &str = "FLYING_POTATO_PORT";
/// Overrides [`ServerConfig::root`].
pub const ROOT_ENV: &str = "FLYING_POTATO_ROOT";

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// The host name or address to bind to.
    pub host: String,
    /// The port to bind to.
    pub port: u16,
    /// The listen backlog.
    pub backlog: u32,
    /// The number of bytes read from each connection. Anything beyond is dropped.
    pub read_buffer_size: usize,
    /// The maximum number of connections served at once.
    pub max_connections: usize,
    /// The directory static files are served from.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            backlog: 5,
            read_buffer_size: 1024,
            max_connections: 1,
            root: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Parse a JSON configuration. Missing fields keep their default.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: ServerConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Load the configuration from the environment.
    ///
    /// Starts from the file named by `FLYING_POTATO_CONFIG`, or the defaults,
    /// then applies the host, port and root overrides.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("cannot read {path}: {e}")))?;
                Self::from_json(&json)?
            }
            None => Self::default(),
        };

        if let Some(host) = lookup(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid {PORT_ENV}: {port}")))?;
        }
        if let Some(root) = lookup(ROOT_ENV) {
            config.root = PathBuf::from(root);
        }

        config.validate()
    }

    fn validate(self) -> Result<Self, Error> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::Config("read_buffer_size must be at least 1".to_string()));
        }
        if self.max_connections == 0 {
            return Err(Error::Config("max_connections must be at least 1".to_string()));
        }
        Ok(self)
    }
}
