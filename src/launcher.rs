use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::app::{LaunchCandidate, LaunchStyle};
use crate::classify::{classify_handoff_stderr, classify_spawn_error, FailureKind};

/// A classified launch failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("unable to find application '{command}': {detail}")]
    ApplicationNotFound { command: String, detail: String },
    #[error("failed to launch '{command}': {detail}")]
    Other { command: String, detail: String },
}

impl LaunchError {
    pub fn new(kind: FailureKind, command: &str, detail: impl Into<String>) -> Self {
        let command = command.to_string();
        let detail = detail.into();
        match kind {
            FailureKind::ApplicationNotFound => LaunchError::ApplicationNotFound { command, detail },
            FailureKind::Other => LaunchError::Other { command, detail },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            LaunchError::ApplicationNotFound { .. } => FailureKind::ApplicationNotFound,
            LaunchError::Other { .. } => FailureKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == FailureKind::ApplicationNotFound
    }
}

/// Starts one launch candidate as an external process.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, candidate: &LaunchCandidate) -> Result<(), LaunchError>;
}

/// Launches through the host OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }

    fn spawn_detached(candidate: &LaunchCandidate) -> Result<(), LaunchError> {
        // The child handle is dropped on purpose: the process outlives us.
        Command::new(&candidate.command)
            .args(&candidate.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| LaunchError::new(classify_spawn_error(&e), &candidate.command, e.to_string()))
    }

    async fn run_handoff(candidate: &LaunchCandidate) -> Result<(), LaunchError> {
        let output = Command::new(&candidate.command)
            .args(&candidate.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| LaunchError::new(classify_spawn_error(&e), &candidate.command, e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        Err(LaunchError::new(
            classify_handoff_stderr(&detail),
            &candidate.command,
            detail,
        ))
    }
}

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    async fn launch(&self, candidate: &LaunchCandidate) -> Result<(), LaunchError> {
        match candidate.style {
            LaunchStyle::Direct => Self::spawn_detached(candidate),
            LaunchStyle::Handoff => Self::run_handoff(candidate).await,
        }
    }
}
