use std::time::{Duration, Instant};

use axum::Router;
use axum::routing::get;
use tokio::sync::oneshot;
use webshare_common::config::Config;
use webshare_core::ShareError;
use webshare_core::lifecycle::{SessionState, ShareSession, StopOutcome};

use crate::utils::{self, loopback};

#[tokio::test]
async fn serves_directory_until_timeout() {
    let root = utils::share_root();
    let cfg = Config {
        port: 0,
        directory: root.path().to_path_buf(),
        grace_period: Duration::from_secs(1),
        ..Config::default()
    }
    .with_timeout(Some(Duration::from_millis(500)));

    let session = ShareSession::from_config(&cfg).await.unwrap();
    let addr = loopback(session.local_addr().unwrap().port());
    let rx = session.subscribe();

    let started = Instant::now();
    let handle = tokio::spawn(session.run(std::future::pending()));

    let response = utils::http_get(addr, "/hello.txt").await;
    assert!(response.starts_with("HTTP/1.1 200 OK"), "unexpected response: {response}");
    assert!(response.ends_with("hello from webshare"));

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, StopOutcome::Graceful);
    assert_eq!(*rx.borrow(), SessionState::Stopped);
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(started.elapsed() < Duration::from_millis(500 + 1000 + 500));
}

#[tokio::test]
async fn signal_forces_stop_when_request_never_finishes() {
    let router = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "too late"
        }),
    );
    let grace = Duration::from_millis(300);
    let session = ShareSession::bind(loopback(0), router)
        .await
        .unwrap()
        .with_grace_period(grace);
    let addr = session.local_addr().unwrap();
    let mut rx = session.subscribe();
    let (tx, signal) = oneshot::channel::<()>();

    let handle = tokio::spawn(session.run(async move {
        let _ = signal.await;
    }));
    rx.wait_for(|s| *s == SessionState::Serving).await.unwrap();

    let _stream = utils::send_request(addr, "/slow").await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let signalled = Instant::now();
    tx.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(1), rx.wait_for(|s| *s >= SessionState::Stopping))
        .await
        .expect("session did not start stopping")
        .unwrap();

    let outcome = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("session did not stop within the grace period")
        .unwrap()
        .unwrap();

    assert_eq!(outcome, StopOutcome::Forced);
    assert_eq!(*rx.borrow(), SessionState::Stopped);
    assert!(signalled.elapsed() >= grace);
    assert!(signalled.elapsed() < grace + Duration::from_secs(1));
}

#[tokio::test]
async fn simultaneous_triggers_stop_once() {
    let session = ShareSession::bind(loopback(0), Router::new())
        .await
        .unwrap()
        .with_timeout(Some(Duration::from_millis(100)))
        .with_grace_period(Duration::from_millis(500));
    let rx = session.subscribe();

    let handle = tokio::spawn(session.run(tokio::time::sleep(Duration::from_millis(100))));

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, StopOutcome::Graceful);
    assert_eq!(*rx.borrow(), SessionState::Stopped);
}

#[tokio::test]
async fn occupied_port_is_startup_fatal() {
    let holder = ShareSession::bind(std::net::SocketAddr::from(([0, 0, 0, 0], 0)), Router::new())
        .await
        .unwrap();
    let taken = holder.local_addr().unwrap().port();

    let cfg = Config {
        port: taken,
        ..Config::default()
    };
    let result = ShareSession::from_config(&cfg).await;
    assert!(matches!(result, Err(ShareError::Bind { .. })));
}
