//! HTTP server implementation.

use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, info, warn, error};

use crate::parser::parse_request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::Dispatcher;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::static_files::StaticFiles;

const BAD_REQUEST_BODY: &[u8] = b"<h1>400 Bad Request</h1>";
const INTERNAL_ERROR_BODY: &[u8] = b"<h1>500 Internal Server Error</h1>";

/// An HTTP server.
///
/// Every accepted connection gets exactly one bounded read, one response
/// and is then closed. `max_connections` bounds how many connections are
/// served at the same time; with the default of one, the next connection is
/// only accepted once the current one is closed.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let dispatcher = Dispatcher::new(StaticFiles::new(config.root.clone()));
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// The dispatcher requests are routed through.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Set up the TCP listener.
    ///
    /// The socket is bound with `SO_REUSEADDR` and listens with the
    /// configured backlog.
    pub async fn bind(&self) -> Result<TcpListener, Error> {
        let (host, port) = (self.config.host.as_str(), self.config.port);
        let addr = lookup_host((host, port))
            .await?
            .next()
            .ok_or_else(|| Error::Config(format!("{host}:{port} did not resolve to an address")))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(self.config.backlog)?;

        info!("Listening at: {addr}", addr = listener.local_addr()?);
        Ok(listener)
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve connections from `listener` until Ctrl+C.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        self.serve_with_shutdown(listener, async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
                Err(e) => {
                    // Without a signal handler the server runs until killed
                    error!("Error setting up Ctrl+C handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
    }

    /// Serve connections from `listener` until `shutdown` completes.
    pub async fn serve_with_shutdown(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            // Wait for a free slot before accepting, so that excess clients
            // queue in the listen backlog
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::log_task_result(res);
                    continue;
                }
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (mut socket, peer) = tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        Self::handle_accept_error(e).await;
                        continue;
                    }
                },
            };

            info!("Connected by: {peer}");

            let dispatcher = self.dispatcher.clone();
            let read_buffer_size = self.config.read_buffer_size;
            tasks.spawn(async move {
                // The permit is dropped when the task completes, releasing the slot
                let _permit = permit;

                if let Err(e) = Self::handle_connection(&mut socket, &dispatcher, read_buffer_size).await {
                    error!("Error handling connection from {peer}: {e}");
                }
            });
        }

        Self::perform_shutdown(&mut tasks).await;
        Ok(())
    }

    fn log_task_result(res: Result<(), tokio::task::JoinError>) {
        if let Err(e) = res {
            error!("Connection task failed: {e}");
        }
    }

    /// Log an accept error and back off briefly before retrying.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Wait for in-flight connections to finish.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let finished = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                Self::log_task_result(res);
            }
        })
        .await;

        if finished.is_err() {
            warn!("Shutdown timed out, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }

        info!("Server shutdown complete");
    }

    /// Handle a single connection.
    ///
    /// Reads once, at most `read_buffer_size` bytes. A request longer than
    /// that is answered from its first `read_buffer_size` bytes; the rest is
    /// never read. A peer that sends nothing is closed without a response.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        dispatcher: &Dispatcher,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            debug!("Connection closed before a request was received");
            return Ok(());
        }

        let response = Self::handle_request(dispatcher, &buf[..n]).await;

        socket.write_all(&response).await?;
        socket.shutdown().await?;

        Ok(())
    }

    /// Turn raw request bytes into serialized response bytes.
    ///
    /// Never fails: a request that cannot be parsed is answered with 400 and
    /// any internal failure with 500.
    pub async fn handle_request(dispatcher: &Dispatcher, data: &[u8]) -> Vec<u8> {
        let result = match parse_request(data) {
            Ok(request) => dispatcher.dispatch(&request).await,
            Err(e) => Err(Error::ParseError(e)),
        };

        let response = match result {
            Ok(response) => response,
            Err(Error::ParseError(e)) => {
                warn!("Rejecting malformed request: {e}");
                HttpResponse::new(StatusCode::BAD_REQUEST).with_body(BAD_REQUEST_BODY)
            }
            Err(e) => {
                error!("Internal error while handling request: {e}");
                HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR).with_body(INTERNAL_ERROR_BODY)
            }
        };

        response.to_bytes()
    }
}
