use std::fmt;
use std::io;
use std::time::Duration;

/// Terminal status of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStatus {
    Up,
    Down,
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorStatus::Up => write!(f, "up"),
            MonitorStatus::Down => write!(f, "down"),
        }
    }
}

/// Broad cause of a failed probe. Every kind is retried the same way; the
/// kind only feeds diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    Timeout,
    Refused,
    Resolve,
    Unreachable,
    Other,
}

impl From<io::ErrorKind> for ProbeFailure {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::TimedOut => ProbeFailure::Timeout,
            io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
                ProbeFailure::Refused
            }
            io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::AddrNotAvailable => ProbeFailure::Unreachable,
            _ => ProbeFailure::Other,
        }
    }
}

/// Why a probe failed, with the underlying message kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub kind: ProbeFailure,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: ProbeFailure, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(ProbeFailure::Timeout, format!("connection attempt timed out after {after:?}"))
    }
}

impl From<io::Error> for ErrorDetail {
    fn from(err: io::Error) -> Self {
        Self::new(err.kind().into(), format!("failed to connect: {err}"))
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub reachable: bool,
    pub error: Option<ErrorDetail>,
}

impl ProbeResult {
    /// The endpoint accepted the connection
    pub fn reachable() -> Self {
        Self { reachable: true, error: None }
    }

    /// The attempt failed
    pub fn unreachable(error: ErrorDetail) -> Self {
        Self { reachable: false, error: Some(error) }
    }
}

/// Terminal result of a polling run, handed to the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Up on the first successful tick, Down once the budget is spent
    pub status: MonitorStatus,

    /// Number of ticks that ran, including the successful one
    pub elapsed_ticks: u64,

    /// Number of ticks the budget allowed
    pub total_ticks: u64,

    /// Most recent probe failure, if any tick failed
    pub last_error: Option<ErrorDetail>,

    /// Wall clock time spent polling
    pub elapsed: Duration,
}

impl PollOutcome {
    pub fn is_up(&self) -> bool {
        self.status == MonitorStatus::Up
    }
}
