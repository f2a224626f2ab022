//! Fakes shared by the integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use upcheck::report::audio::{AudioError, AudioPlayer};
use upcheck::report::notify::{NotifyError, Notifier};
use upcheck::{Endpoint, ErrorDetail, Probe, ProbeFailure, ProbeResult, Progress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(u64),
    Probe(u64),
    Advance(u64),
    Finish,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Probe that fails until `succeed_on` (1-based), or forever when `None`
pub struct ScriptedProbe {
    pub succeed_on: Option<u64>,
    calls: Mutex<u64>,
    log: EventLog,
}

impl ScriptedProbe {
    pub fn new(succeed_on: Option<u64>, log: EventLog) -> Self {
        Self { succeed_on, calls: Mutex::new(0), log }
    }
}

#[async_trait::async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, _endpoint: &Endpoint, _attempt_timeout: Duration) -> ProbeResult {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.log.lock().unwrap().push(Event::Probe(call));

        if self.succeed_on == Some(call) {
            ProbeResult::reachable()
        } else {
            ProbeResult::unreachable(ErrorDetail::new(
                ProbeFailure::Refused,
                format!("failed to connect: attempt {call} refused"),
            ))
        }
    }
}

pub struct RecordingProgress {
    log: EventLog,
}

impl RecordingProgress {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl Progress for RecordingProgress {
    fn start(&mut self, total_ticks: u64) {
        self.log.lock().unwrap().push(Event::Start(total_ticks));
    }

    fn advance(&mut self, tick: u64) {
        self.log.lock().unwrap().push(Event::Advance(tick));
    }

    fn finish(&mut self) {
        self.log.lock().unwrap().push(Event::Finish);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<PathBuf>,
    pub icon_existed: bool,
}

#[derive(Default, Clone)]
pub struct FakeNotifier {
    pub sent: Arc<Mutex<Vec<Notification>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(Notification {
            title: title.to_string(),
            body: body.to_string(),
            icon: icon.map(Path::to_path_buf),
            icon_existed: icon.is_some_and(Path::exists),
        });
        if self.fail {
            return Err(NotifyError::Spawn {
                program: "fake-notify".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct FakePlayer {
    pub played: Arc<Mutex<Vec<PathBuf>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl AudioPlayer for FakePlayer {
    async fn play(&self, file: &Path) -> Result<(), AudioError> {
        self.played.lock().unwrap().push(file.to_path_buf());
        if self.fail {
            return Err(AudioError::Playback("no audio device".to_string()));
        }
        Ok(())
    }
}

pub fn log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}
