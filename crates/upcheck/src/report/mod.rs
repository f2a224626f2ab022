//! Outcome reporting.
//!
//! Turns a finished poll into a notification and a sound according to a
//! [`NotifyPolicy`]. Failures here are collected and logged; they never
//! change the outcome that was already determined.

pub mod assets;
pub mod audio;
pub mod notify;

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tracing::warn;

use crate::endpoint::Endpoint;
use crate::monitoring::{MonitorStatus, PollOutcome};
use assets::{AssetError, AssetStore, DOWN_ICON, ExtractedAssets, NOTIFICATION_SOUND, UP_ICON};
use audio::{AudioError, AudioPlayer};
use notify::{NotifyError, Notifier};

/// Command for an external collaborator: no stdin or stdout, stderr kept
/// for error messages. The child is killed if the caller stops waiting on it.
pub(crate) fn collaborator_command(program: impl AsRef<OsStr>) -> Command {
    let mut command = Command::new(program);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

/// Which side effects run for which outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyPolicy {
    pub notify_on_up: bool,
    pub notify_on_down: bool,
    pub sound_on_up: bool,
    pub sound_on_down: bool,
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self { notify_on_up: true, notify_on_down: true, sound_on_up: true, sound_on_down: true }
    }
}

impl NotifyPolicy {
    pub fn notify_for(&self, status: MonitorStatus) -> bool {
        match status {
            MonitorStatus::Up => self.notify_on_up,
            MonitorStatus::Down => self.notify_on_down,
        }
    }

    pub fn sound_for(&self, status: MonitorStatus) -> bool {
        match status {
            MonitorStatus::Up => self.sound_on_up,
            MonitorStatus::Down => self.sound_on_down,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Human readable notification content for an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub body: String,
    pub icon: &'static str,
}

impl Message {
    pub fn compose(outcome: &PollOutcome, endpoint: &Endpoint) -> Self {
        match outcome.status {
            MonitorStatus::Up => Self {
                title: "Up!".to_string(),
                body: format!("{endpoint} is Up!"),
                icon: UP_ICON,
            },
            MonitorStatus::Down => {
                let reason = outcome
                    .last_error
                    .as_ref()
                    .map_or_else(|| "no response".to_string(), |e| e.message.clone());
                Self {
                    title: "Down!".to_string(),
                    body: format!("{endpoint} is Down...({reason})"),
                    icon: DOWN_ICON,
                }
            }
        }
    }
}

/// What a report run managed to do
#[derive(Debug, Default)]
pub struct ReportSummary {
    pub notified: bool,
    pub sound_played: bool,
    pub failures: Vec<ReportError>,
}

impl ReportSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, error: impl Into<ReportError>) {
        let error = error.into();
        warn!("{error}");
        self.failures.push(error);
    }
}

pub struct OutcomeReporter {
    assets: Box<dyn AssetStore>,
    notifier: Box<dyn Notifier>,
    player: Box<dyn AudioPlayer>,
}

impl OutcomeReporter {
    pub fn new(
        assets: Box<dyn AssetStore>,
        notifier: Box<dyn Notifier>,
        player: Box<dyn AudioPlayer>,
    ) -> Self {
        Self { assets, notifier, player }
    }

    /// Dispatch `outcome` to the notification and audio collaborators.
    ///
    /// Assets are extracted into a temporary directory that lives only for
    /// the duration of this call, so it is removed on every exit path,
    /// including when the returned future is dropped mid-flight.
    pub async fn report(
        &self,
        outcome: &PollOutcome,
        endpoint: &Endpoint,
        policy: NotifyPolicy,
    ) -> ReportSummary {
        let mut summary = ReportSummary::default();
        let wants_notification = policy.notify_for(outcome.status);
        let wants_sound = policy.sound_for(outcome.status);
        if !wants_notification && !wants_sound {
            return summary;
        }

        let scratch = match ExtractedAssets::new() {
            Ok(scratch) => scratch,
            Err(e) => {
                summary.record(e);
                return summary;
            }
        };

        if wants_notification {
            let message = Message::compose(outcome, endpoint);
            let icon = self.extract(&scratch, message.icon, &mut summary);
            match self.notifier.notify(&message.title, &message.body, icon.as_deref()).await {
                Ok(()) => summary.notified = true,
                Err(e) => summary.record(e),
            }
        }

        if wants_sound {
            if let Some(sound) = self.extract(&scratch, NOTIFICATION_SOUND, &mut summary) {
                match self.player.play(&sound).await {
                    Ok(()) => summary.sound_played = true,
                    Err(e) => summary.record(e),
                }
            }
        }

        summary
    }

    fn extract(
        &self,
        scratch: &ExtractedAssets,
        asset: &str,
        summary: &mut ReportSummary,
    ) -> Option<PathBuf> {
        match scratch.extract(self.assets.as_ref(), asset) {
            Ok(path) => Some(path),
            Err(e) => {
                summary.record(e);
                None
            }
        }
    }
}
