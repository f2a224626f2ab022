pub mod checker;
/// Reachability engine
///
/// This module is responsible for:
/// - Performing bounded TCP connect probes
/// - Driving probes on a fixed interval within a time budget
/// - Producing the terminal up/down outcome
pub mod poller;
pub mod types;

pub use checker::{Probe, TcpChecker};
pub use poller::{PollConfig, PollConfigError, PollLoop};
pub use types::{ErrorDetail, MonitorStatus, PollOutcome, ProbeFailure, ProbeResult};
