//! upcheck - wait for a TCP endpoint to start accepting connections
//!
//! The library resolves a loosely formatted endpoint string, polls it with
//! bounded TCP connect attempts on a fixed interval until it answers or the
//! time budget runs out, and reports the outcome through desktop
//! notification and audio collaborators.

pub mod endpoint;
pub mod monitoring;
pub mod progress;
pub mod report;

// Re-export main types
pub use endpoint::{Endpoint, EndpointError, resolve, validate_format};
pub use monitoring::{
    ErrorDetail, MonitorStatus, PollConfig, PollConfigError, PollLoop, PollOutcome, Probe,
    ProbeFailure, ProbeResult, TcpChecker,
};
pub use progress::{NoProgress, Progress, TerminalProgress};
pub use report::{NotifyPolicy, OutcomeReporter, ReportError, ReportSummary};
