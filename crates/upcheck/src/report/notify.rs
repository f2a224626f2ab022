use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

use super::collaborator_command;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed { program: String, status: ExitStatus, stderr: String },
}

/// Desktop notification service
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), NotifyError>;
}

/// Notifier backed by a `notify-send` compatible command
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
    app_name: String,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self { program: program.into(), app_name: app_name.into() }
    }
}

impl Default for CommandNotifier {
    fn default() -> Self {
        Self::new("notify-send", "upcheck")
    }
}

#[async_trait::async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), NotifyError> {
        let mut command = collaborator_command(&self.program);
        command.arg("--app-name").arg(&self.app_name);
        if let Some(icon) = icon {
            command.arg("--icon").arg(icon);
        }

        let output = command
            .arg(title)
            .arg(body)
            .output()
            .await
            .map_err(|source| NotifyError::Spawn { program: self.program.clone(), source })?;

        if !output.status.success() {
            return Err(NotifyError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
