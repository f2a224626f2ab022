use std::path::Path;

use thiserror::Error;

use super::collaborator_command;

#[derive(Debug, Error)]
pub enum AudioError {
    /// The player ran but could not decode or play the clip
    #[error("{program} could not play {file} ({status}): {stderr}")]
    Decode { program: String, file: String, status: std::process::ExitStatus, stderr: String },
    #[error("audio playback unavailable: {0}")]
    Playback(String),
}

/// Plays a sound file
#[async_trait::async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, file: &Path) -> Result<(), AudioError>;
}

/// Player that shells out to an external command, e.g. `paplay` or
/// `aplay -q`. The file path is appended as the last argument.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    argv: Vec<String>,
}

impl CommandPlayer {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new(vec!["paplay".to_string()])
    }
}

#[async_trait::async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, file: &Path) -> Result<(), AudioError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(AudioError::Playback("no player command configured".to_string()));
        };

        let output = collaborator_command(program)
            .args(args)
            .arg(file)
            .output()
            .await
            .map_err(|e| AudioError::Playback(format!("failed to run {program}: {e}")))?;

        if !output.status.success() {
            return Err(AudioError::Decode {
                program: program.clone(),
                file: file.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
