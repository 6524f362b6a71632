use std::io;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// The server stopped on its own before any shutdown was requested.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
