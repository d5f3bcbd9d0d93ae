//! End-to-end tests over a real TCP socket.

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use flying_potato::{parse_response, HttpServer, ParsedResponse, ServerConfig, ServerError};

fn scratch_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flying-potato-it-{name}-{pid}", pid = std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn spawn_server(
    config: ServerConfig,
) -> (SocketAddr, oneshot::Sender<()>, JoinHandle<Result<(), ServerError>>) {
    let server = HttpServer::new(config);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        server
            .serve_with_shutdown(listener, async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    (addr, shutdown_tx, handle)
}

async fn send(addr: SocketAddr, request: &[u8]) -> ParsedResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    // The server closes the connection after the response
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    parse_response(&response).unwrap()
}

#[tokio::test]
async fn test_serves_requests_over_tcp() {
    let root = scratch_root("serve");
    std::fs::write(root.join("index.html"), b"<h1>potato</h1>").unwrap();

    let config = ServerConfig {
        port: 0,
        root,
        ..ServerConfig::default()
    };
    let (addr, shutdown_tx, handle) = spawn_server(config).await;

    let response = send(addr, b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert_eq!(response.version, "2.0");
    assert_eq!(response.status, 200);
    assert_eq!(response.get_header("Server"), Some("Flying Potato"));
    assert_eq!(response.get_header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, b"<h1>potato</h1>");

    let response = send(addr, b"GET /missing.html HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 404);
    assert_eq!(response.body, b"<h1> 404 Not Found </h1>");

    let response = send(addr, b"OPTIONS / HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.get_header("Allow"), Some("OPTIONS, GET"));
    assert!(response.body.is_empty());

    let response = send(addr, b"POST /index.html HTTP/1.1\r\n\r\n").await;
    assert_eq!(response.status, 501);
    assert_eq!(response.body, b"<h1>501 Not Implemented</h1>");

    // A malformed request does not stop the accept loop
    let response = send(addr, b"NONSENSE\r\n\r\n").await;
    assert_eq!(response.status, 400);
    let response = send(addr, b"GET /index.html\r\n\r\n").await;
    assert_eq!(response.status, 200);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_serves_concurrent_connections_when_allowed() {
    let root = scratch_root("concurrent");
    std::fs::write(root.join("a.txt"), b"a").unwrap();

    let config = ServerConfig {
        port: 0,
        max_connections: 4,
        root,
        ..ServerConfig::default()
    };
    let (addr, shutdown_tx, handle) = spawn_server(config).await;

    let requests = (0..8).map(|_| tokio::spawn(send(addr, b"GET /a.txt HTTP/1.1\r\n\r\n")));
    for request in requests.collect::<Vec<_>>() {
        let response = request.await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.get_header("Content-Type"), Some("text/plain"));
        assert_eq!(response.body, b"a");
    }

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
