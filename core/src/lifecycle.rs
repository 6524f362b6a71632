//! # Share Lifecycle
//!
//! A [`ShareSession`] moves through `Starting → Serving → Stopping → Stopped`.
//!
//! While serving, two triggers are armed: an optional countdown and an external
//! termination signal. Both cancel the same [`CancellationToken`], so whichever fires first
//! starts the shutdown and the other becomes a no-op. Once stopping, in-flight connections
//! get a bounded grace period before the server is abandoned.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use webshare_common::config::{Config, GRACE_PERIOD};

use crate::ShareError;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Starting,
    Serving,
    Stopping,
    Stopped,
}

/// How the drain after a shutdown request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Every connection finished inside the grace period.
    Graceful,
    /// The grace period ran out, or the server failed while draining.
    ///
    /// The listener is closed by then, but connection tasks already accepted by the server
    /// are not cancelled. They end with the runtime, i.e. when the process exits.
    Forced,
}

pub struct ShareSession {
    listener: TcpListener,
    router: Router,
    timeout: Option<Duration>,
    grace_period: Duration,
    shutdown: CancellationToken,
    state: watch::Sender<SessionState>,
}

impl ShareSession {
    /// Binds `addr` for `router`. The session stays in `Starting` until [`run`](Self::run).
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, ShareError> {
        let listener: TcpListener = TcpListener::bind(addr)
            .await
            .map_err(|source| ShareError::Bind { addr, source })?;
        let (state, _) = watch::channel(SessionState::Starting);

        Ok(Self {
            listener,
            router,
            timeout: None,
            grace_period: GRACE_PERIOD,
            shutdown: CancellationToken::new(),
            state,
        })
    }

    /// Binds every interface on the configured port and serves the configured directory.
    pub async fn from_config(cfg: &Config) -> Result<Self, ShareError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
        let session = Self::bind(addr, server::router(cfg.directory.clone()))
            .await?
            .with_timeout(cfg.timeout)
            .with_grace_period(cfg.grace_period);
        Ok(session)
    }

    /// Arms the countdown. `None` or a zero duration runs until interrupted.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// A handle that requests shutdown when cancelled, exactly like a termination signal.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Serves until the countdown expires or `signal` resolves, then drains.
    ///
    /// Returns an error only when the server stops on its own while serving; in that case no
    /// drain is attempted.
    pub async fn run<F>(self, signal: F) -> Result<StopOutcome, ShareError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            router,
            timeout,
            grace_period,
            shutdown,
            state,
        } = self;

        let mut server: JoinHandle<io::Result<()>> = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
                    .with_graceful_shutdown(shutdown.cancelled_owned())
                    .await
            }
        });
        advance(&state, SessionState::Serving);

        if let Some(timeout) = timeout {
            info!("Server will shut down after {timeout:?}");
            tokio::spawn(expire_after(timeout, shutdown.clone()));
        }
        tokio::spawn(cancel_on_signal(signal, shutdown.clone()));

        // A graceful exit of the server implies the token was cancelled, so the drain branch
        // must win whenever both are ready.
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {}
            result = &mut server => {
                shutdown.cancel();
                advance(&state, SessionState::Stopped);
                return match result {
                    Ok(Ok(())) => Err(ShareError::Serve(io::Error::other("server exited unexpectedly"))),
                    Ok(Err(e)) => Err(ShareError::Serve(e)),
                    Err(e) => Err(ShareError::Task(e)),
                };
            }
        }

        advance(&state, SessionState::Stopping);
        let outcome: StopOutcome = match tokio::time::timeout(grace_period, &mut server).await {
            Ok(Ok(Ok(()))) => {
                info!("Server gracefully stopped");
                StopOutcome::Graceful
            }
            Ok(Ok(Err(e))) => {
                warn!("Server forced to shutdown: {e}");
                StopOutcome::Forced
            }
            Ok(Err(e)) => {
                warn!("Server forced to shutdown: {e}");
                StopOutcome::Forced
            }
            Err(_) => {
                server.abort();
                // Wait for the abort so the listener is closed once `run` returns.
                let _ = server.await;
                warn!("Server forced to shutdown: connections still open after {grace_period:?}");
                StopOutcome::Forced
            }
        };
        advance(&state, SessionState::Stopped);

        Ok(outcome)
    }
}

/// Moves the state forward. Attempts to go back are ignored.
fn advance(state: &watch::Sender<SessionState>, next: SessionState) -> bool {
    state.send_if_modified(|current| {
        if next > *current {
            *current = next;
            true
        } else {
            false
        }
    })
}

async fn expire_after(timeout: Duration, shutdown: CancellationToken) {
    tokio::select! {
        _ = tokio::time::sleep(timeout) => {
            info!("Share expired after {timeout:?}, shutting down...");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
}

async fn cancel_on_signal<F>(signal: F, shutdown: CancellationToken)
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = signal => {
            info!("Received interrupt signal, shutting down...");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
}

/// Resolves on the first SIGINT or SIGTERM (ctrl-c only on non-unix targets).
pub async fn termination_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
