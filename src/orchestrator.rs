use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::app::{AppId, LaunchCandidate, Target};
use crate::launcher::{LaunchError, ProcessLauncher};
use crate::resolver::CandidateSource;
use crate::shell::{ShellActions, ShellError};

/// How a successful dispatch was carried out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum Dispatched {
    Revealed,
    DefaultHandler,
    Launched { command: String, attempt: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("default handler failed: {0}")]
    DefaultOpen(#[from] ShellError),
}

/// Tries candidates strictly in order. A not-found failure moves on to the
/// next candidate; any other failure is returned at once.
pub struct Orchestrator {
    resolver: Arc<dyn CandidateSource>,
    launcher: Arc<dyn ProcessLauncher>,
    shell: Arc<dyn ShellActions>,
}

impl Orchestrator {
    pub fn new(
        resolver: Arc<dyn CandidateSource>,
        launcher: Arc<dyn ProcessLauncher>,
        shell: Arc<dyn ShellActions>,
    ) -> Self {
        Self {
            resolver,
            launcher,
            shell,
        }
    }

    pub async fn open(&self, path: &str, app: AppId) -> Result<Dispatched, DispatchError> {
        self.open_at(&Target::new(path), app).await
    }

    pub async fn open_at(&self, target: &Target, app: AppId) -> Result<Dispatched, DispatchError> {
        if app.is_file_manager() {
            self.shell.reveal(&target.path).await;
            return Ok(Dispatched::Revealed);
        }

        let candidates = self.resolver.resolve(app, target);
        let Some((final_candidate, earlier)) = candidates.split_last() else {
            tracing::debug!(%app, path = %target.path, "no known launcher, using default handler");
            self.shell.open_default(&target.path).await?;
            return Ok(Dispatched::DefaultHandler);
        };

        for (attempt, candidate) in earlier.iter().enumerate() {
            match self.attempt(app, attempt, candidate).await {
                Ok(dispatched) => return Ok(dispatched),
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%app, attempt, error = %err, "candidate not installed");
                }
                Err(err) => return Err(err.into()),
            }
        }

        // The last candidate's failure, not-found or not, is the result.
        Ok(self.attempt(app, earlier.len(), final_candidate).await?)
    }

    async fn attempt(
        &self,
        app: AppId,
        attempt: usize,
        candidate: &LaunchCandidate,
    ) -> Result<Dispatched, LaunchError> {
        tracing::debug!(%app, attempt, command = %candidate.command_line(), "trying candidate");
        self.launcher.launch(candidate).await?;
        tracing::info!(%app, command = %candidate.command, "launched");
        Ok(Dispatched::Launched {
            command: candidate.command.clone(),
            attempt,
        })
    }
}
