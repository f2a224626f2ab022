use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::AppError;

/// Wait until a TCP endpoint accepts connections, then notify.
#[derive(Debug, Parser)]
#[command(name = "upcheck", version)]
pub struct Cli {
    /// Endpoint to watch: <host>:<port>, <ip>:<port> or <scheme>://<host>:<port>
    #[arg(value_name = "ENDPOINT")]
    pub endpoints: Vec<String>,

    /// Overall time budget [default: 10m]. Valid units are ns, us, ms, s, m, h
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Wait between connection attempts [default: 1s]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Give up on a single connection attempt after this long [default: 1s]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub attempt_timeout: Option<Duration>,

    /// Config file [default: $XDG_CONFIG_HOME/upcheck/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a default config file and exit
    #[arg(long, conflicts_with = "show_config")]
    pub init_config: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Do not send desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Do not play a sound
    #[arg(long)]
    pub no_sound: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The single positional endpoint argument
    pub fn endpoint(&self) -> Result<&str, AppError> {
        match self.endpoints.as_slice() {
            [endpoint] => Ok(endpoint),
            other => Err(AppError::InvalidArgumentCount(other.len())),
        }
    }
}

/// Parse a duration such as `600`, `90s`, `1m30s`, `1.5h` or `250ms`.
/// A bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let invalid = || format!("invalid duration '{input}'");
    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let split = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(split);
        let split = tail.find(is_number).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(split);

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            "" => return Err(format!("missing unit in duration '{input}'")),
            other => return Err(format!("unknown unit '{other}' in duration '{input}'")),
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("{}: expected a number", invalid()));
        }

        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let mut nanos = whole.checked_mul(unit_nanos).ok_or_else(invalid)?;
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| invalid())?;
            let scale = u32::try_from(fraction.len())
                .ok()
                .and_then(|len| 10u128.checked_pow(len))
                .ok_or_else(invalid)?;
            nanos += digits.checked_mul(unit_nanos).ok_or_else(invalid)? / scale;
        }

        total = total.checked_add(nanos).ok_or_else(invalid)?;
        rest = next;
    }

    u64::try_from(total).map(Duration::from_nanos).map_err(|_| invalid())
}
