use std::{env, fmt, fs, io, path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upcheck::{NotifyPolicy, PollConfig, PollConfigError};

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadFailed { path: path::PathBuf, source: io::Error },
    #[error("failed to write config file {}: {source}", .path.display())]
    WriteFailed { path: path::PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseFailed { path: path::PathBuf, source: toml::de::Error },
    #[error("failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("config file {} does not exist", .0.display())]
    Missing(path::PathBuf),
    #[error("config file {} already exists", .0.display())]
    AlreadyExists(path::PathBuf),
    #[error("no config directory available, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poll: Poll,
    pub notify: NotifyPolicy,
    pub notifier: Notifier,
    pub audio: Audio,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Poll {
    pub interval_ms: u64,
    /// Unset means the default attempt timeout, capped at the interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_timeout_ms: Option<u64>,
    pub budget_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifier {
    pub command: String,
    pub app_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Audio {
    /// Player argv; the sound file is appended
    pub command: Vec<String>,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            interval_ms: millis(PollConfig::DEFAULT_INTERVAL),
            attempt_timeout_ms: None,
            budget_secs: PollConfig::DEFAULT_BUDGET.as_secs(),
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self { command: "notify-send".into(), app_name: "upcheck".into() }
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self { command: vec!["paplay".into()] }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/upcheck/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("upcheck/config.toml"))
}

/// Explicit path if given, default location otherwise
pub fn resolve_path(optional_path: Option<&path::Path>) -> Result<path::PathBuf, Error> {
    match optional_path {
        Some(path) => Ok(normalize_toml_path(path)),
        None => default_config_path(),
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Configuration State:")?;
        write_title_1(f, "Poll")?;
        write_1(f, "Interval (ms)", &self.poll.interval_ms)?;
        match self.poll.attempt_timeout_ms {
            Some(ms) => write_1(f, "Attempt Timeout (ms)", &ms)?,
            None => write_1(
                f,
                "Attempt Timeout (ms)",
                &format!("auto (at most {})", millis(PollConfig::DEFAULT_ATTEMPT_TIMEOUT)),
            )?,
        }
        write_1(f, "Budget (s)", &self.poll.budget_secs)?;
        write_title_1(f, "Notify")?;
        write_1(f, "Notify On Up", &self.notify.notify_on_up)?;
        write_1(f, "Notify On Down", &self.notify.notify_on_down)?;
        write_1(f, "Sound On Up", &self.notify.sound_on_up)?;
        write_1(f, "Sound On Down", &self.notify.sound_on_down)?;
        write_title_1(f, "Notifier")?;
        write_1(f, "Command", &self.notifier.command)?;
        write_1(f, "App Name", &self.notifier.app_name)?;
        write_title_1(f, "Audio")?;
        write_1(f, "Command", &self.audio.command.join(" "))?;

        Ok(())
    }
}

impl Config {
    /// Load the config file.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file given explicitly is an error. Nothing is written.
    pub fn from_config(optional_path: Option<&path::Path>) -> Result<Self, Error> {
        let config_path = resolve_path(optional_path)?;

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| Error::ParseFailed { path: config_path, source })
        } else if optional_path.is_some() {
            Err(Error::Missing(config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize and write a config to a file, refusing to overwrite
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        if path.exists() {
            return Err(Error::AlreadyExists(path.to_path_buf()));
        }

        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::WriteFailed { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Command line flags switch side effects off, never on
    pub fn policy(&self, cli: &Cli) -> NotifyPolicy {
        let mut policy = self.notify;
        if cli.no_notify {
            policy.notify_on_up = false;
            policy.notify_on_down = false;
        }
        if cli.no_sound {
            policy.sound_on_up = false;
            policy.sound_on_down = false;
        }
        policy
    }

    /// Poll timing, command line flags taking precedence over the file.
    /// An attempt timeout nobody asked for shrinks to fit the interval; one
    /// that was set explicitly must already fit.
    pub fn poll_config(&self, cli: &Cli) -> Result<PollConfig, PollConfigError> {
        let interval = cli.interval.unwrap_or(Duration::from_millis(self.poll.interval_ms));
        let attempt_timeout = cli
            .attempt_timeout
            .or(self.poll.attempt_timeout_ms.map(Duration::from_millis))
            .unwrap_or(PollConfig::DEFAULT_ATTEMPT_TIMEOUT.min(interval));

        PollConfig::new(
            interval,
            cli.timeout.unwrap_or(Duration::from_secs(self.poll.budget_secs)),
            attempt_timeout,
        )
    }
}
