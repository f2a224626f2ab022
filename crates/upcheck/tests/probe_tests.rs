//! TCP probe tests against real local sockets

use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use upcheck::{Endpoint, Probe, TcpChecker};

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_probe_without_listener_fails_within_timeout() {
    let endpoint = Endpoint::new("127.0.0.1", closed_port().await).unwrap();
    let attempt_timeout = Duration::from_millis(500);

    let start = Instant::now();
    let result = TcpChecker::new().probe(&endpoint, attempt_timeout).await;

    assert!(!result.reachable);
    assert!(result.error.is_some());
    assert!(start.elapsed() < attempt_timeout + Duration::from_millis(250));
}

#[tokio::test]
async fn test_probe_with_listener_succeeds() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = Endpoint::new("127.0.0.1", listener.local_addr().unwrap().port()).unwrap();

    let result = TcpChecker::new().probe(&endpoint, Duration::from_secs(1)).await;

    assert!(result.reachable);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_probe_unresolvable_host() {
    let endpoint = Endpoint::new("upcheck-does-not-exist.invalid", 80).unwrap();

    let result = TcpChecker::new().probe(&endpoint, Duration::from_secs(1)).await;

    assert!(!result.reachable);
    assert!(!result.error.unwrap().message.is_empty());
}
