use std::process::ExitCode;

use thiserror::Error;
use upcheck::{EndpointError, PollConfigError};

use crate::config;

/// Exit status for argument, format and configuration errors
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "expected exactly one endpoint (<host>:<port>, <ip>:<port> or <scheme>://<host>:<port>), \
         got {0}"
    )]
    InvalidArgumentCount(usize),
    #[error(transparent)]
    InvalidEndpoint(#[from] EndpointError),
    #[error("invalid polling options: {0}")]
    PollConfig(#[from] PollConfigError),
    #[error(transparent)]
    Config(#[from] config::Error),
}

impl AppError {
    /// Every variant is raised before any probing starts
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(EXIT_USAGE)
    }
}
