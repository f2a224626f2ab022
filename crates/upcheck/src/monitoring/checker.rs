use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::trace;

use super::types::{ErrorDetail, ProbeFailure, ProbeResult};
use crate::endpoint::Endpoint;

/// One reachability attempt against an endpoint
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Attempt to reach `endpoint`, giving up after `attempt_timeout`
    async fn probe(&self, endpoint: &Endpoint, attempt_timeout: Duration) -> ProbeResult;
}

/// TCP handshake checker. Nothing is written to or read from the socket; the
/// connection is closed as soon as it is established.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpChecker;

impl TcpChecker {
    pub fn new() -> Self {
        Self
    }

    async fn connect(endpoint: &Endpoint) -> Result<SocketAddr, ErrorDetail> {
        let addrs: Vec<SocketAddr> = lookup_host((endpoint.host(), endpoint.port()))
            .await
            .map_err(|e| {
                ErrorDetail::new(
                    ProbeFailure::Resolve,
                    format!("failed to resolve {}: {e}", endpoint.host()),
                )
            })?
            .collect();

        let mut last_error = ErrorDetail::new(
            ProbeFailure::Resolve,
            format!("{} did not resolve to any address", endpoint.host()),
        );

        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    drop(stream);
                    return Ok(addr);
                }
                Err(e) => last_error = ErrorDetail::from(e),
            }
        }

        Err(last_error)
    }
}

#[async_trait::async_trait]
impl Probe for TcpChecker {
    async fn probe(&self, endpoint: &Endpoint, attempt_timeout: Duration) -> ProbeResult {
        let start = Instant::now();

        match timeout(attempt_timeout, Self::connect(endpoint)).await {
            Ok(Ok(addr)) => {
                trace!("connected to {addr} in {}ms", start.elapsed().as_millis());
                ProbeResult::reachable()
            }
            Ok(Err(detail)) => ProbeResult::unreachable(detail),
            Err(_) => ProbeResult::unreachable(ErrorDetail::timeout(attempt_timeout)),
        }
    }
}
