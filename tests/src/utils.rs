use std::net::SocketAddr;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// A temporary share root holding `hello.txt`.
pub fn share_root() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join("hello.txt"), "hello from webshare").unwrap();
    dir
}

/// Loopback address for a session bound on all interfaces.
pub fn loopback(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// Sends a request and leaves the connection open without reading the response.
pub async fn send_request(addr: SocketAddr, path: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("failed to connect");
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    stream
}

/// Performs a full `GET` and returns the raw response.
pub async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = send_request(addr, path).await;
    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
