use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{AppId, LaunchCandidate, Target};
use crate::classify::FailureKind;
use crate::launcher::{LaunchError, ProcessLauncher};
use crate::resolver::CandidateSource;
use crate::shell::{ShellActions, ShellError};

pub struct FixedCandidates {
    candidates: Vec<LaunchCandidate>,
    pub calls: Mutex<usize>,
}

impl FixedCandidates {
    pub fn new(commands: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            candidates: commands
                .iter()
                .map(|c| LaunchCandidate::direct(c, vec!["/work/file.rs".into()]))
                .collect(),
            calls: Mutex::new(0),
        })
    }
}

impl CandidateSource for FixedCandidates {
    fn resolve(&self, _app: AppId, _target: &Target) -> Vec<LaunchCandidate> {
        *self.calls.lock().unwrap() += 1;
        self.candidates.clone()
    }
}

/// Replies per command; commands without a scripted reply succeed.
#[derive(Default)]
pub struct ScriptedLauncher {
    replies: HashMap<String, FailureKind>,
    attempted: Mutex<Vec<String>>,
}

impl ScriptedLauncher {
    pub fn failing(replies: &[(&str, FailureKind)]) -> Arc<Self> {
        Arc::new(Self {
            replies: replies
                .iter()
                .map(|(c, k)| (c.to_string(), *k))
                .collect(),
            attempted: Mutex::new(Vec::new()),
        })
    }

    pub fn attempted(&self) -> Vec<String> {
        self.attempted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessLauncher for ScriptedLauncher {
    async fn launch(&self, candidate: &LaunchCandidate) -> Result<(), LaunchError> {
        self.attempted.lock().unwrap().push(candidate.command.clone());
        match self.replies.get(&candidate.command) {
            Some(kind) => Err(LaunchError::new(
                *kind,
                &candidate.command,
                format!("{} failed", candidate.command),
            )),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingShell {
    pub revealed: Mutex<Vec<String>>,
    pub default_opened: Mutex<Vec<String>>,
    pub urls: Mutex<Vec<String>>,
    pub default_fails: bool,
}

#[async_trait]
impl ShellActions for RecordingShell {
    async fn reveal(&self, path: &str) {
        self.revealed.lock().unwrap().push(path.to_string());
    }

    async fn open_default(&self, path: &str) -> Result<(), ShellError> {
        self.default_opened.lock().unwrap().push(path.to_string());
        if self.default_fails {
            Err(ShellError::OpenFailed {
                target: path.to_string(),
                detail: "no handler registered".to_string(),
            })
        } else {
            Ok(())
        }
    }

    async fn open_url(&self, url: &str) -> Result<(), ShellError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
