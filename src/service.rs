use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::app::{AppId, Position, Target};
use crate::config::expand_home;
use crate::error::AppError;
use crate::launcher::SystemLauncher;
use crate::orchestrator::{Dispatched, Orchestrator};
use crate::resolver::{Platform, PlatformResolver};
use crate::shell::{ShellActions, SystemShell};
use crate::store::PreferenceStore;

pub struct Dispatcher {
    orchestrator: Orchestrator,
    shell: Arc<dyn ShellActions>,
    store: PreferenceStore,
}

impl Dispatcher {
    pub fn new(orchestrator: Orchestrator, shell: Arc<dyn ShellActions>, store: PreferenceStore) -> Self {
        Self {
            orchestrator,
            shell,
            store,
        }
    }

    /// Wire the real launcher and shell for `platform`.
    pub fn system(store: PreferenceStore, platform: Platform) -> Self {
        let shell: Arc<dyn ShellActions> = Arc::new(SystemShell::new());
        let orchestrator = Orchestrator::new(
            Arc::new(PlatformResolver::new(platform)),
            Arc::new(SystemLauncher::new()),
            shell.clone(),
        );
        Self::new(orchestrator, shell, store)
    }

    /// Open `path` in an explicitly chosen application and remember the choice.
    ///
    /// The preference is recorded before dispatch, so it sticks even when the
    /// launch fails.
    pub async fn open_in_app(&self, path: &str, app: AppId) -> Result<Dispatched, AppError> {
        self.store.set_last_used(app)?;
        Ok(self.orchestrator.open(path, app).await?)
    }

    /// Open a possibly relative `path` in the last used application.
    pub async fn open_in_editor(
        &self,
        path: &str,
        cwd: Option<&Path>,
        position: Option<Position>,
    ) -> Result<(AppId, Dispatched), AppError> {
        let resolved = resolve_path(path, cwd)?;
        let app = self.store.get_last_used()?;
        let target = Target::new(resolved.to_string_lossy()).with_position(position);
        let dispatched = self.orchestrator.open_at(&target, app).await?;
        Ok((app, dispatched))
    }

    pub async fn reveal(&self, path: &str) {
        self.shell.reveal(path).await;
    }

    pub async fn open_url(&self, url: &str) -> Result<(), AppError> {
        self.shell.open_url(url).await.map_err(|e| {
            tracing::error!(url, error = %e, "failed to open url");
            AppError::from(e)
        })
    }

    pub fn last_used(&self) -> Result<AppId, AppError> {
        Ok(self.store.get_last_used()?)
    }

    pub fn set_last_used(&self, app: AppId) -> Result<(), AppError> {
        Ok(self.store.set_last_used(app)?)
    }

    /// Close the preference store.
    pub fn shutdown(self) -> Result<(), AppError> {
        Ok(self.store.close()?)
    }
}

/// Resolve `path` against `cwd` (or the process working directory).
///
/// `~` expands to the home directory; `.` and `..` are folded lexically so
/// the file does not need to exist yet.
pub fn resolve_path(path: &str, cwd: Option<&Path>) -> Result<PathBuf, AppError> {
    if path.trim().is_empty() {
        return Err(AppError::Path {
            path: path.to_string(),
            message: "path is empty".to_string(),
        });
    }

    let expanded = expand_home(path);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        let base = match cwd {
            Some(dir) => expand_home(&dir.to_string_lossy()),
            None => std::env::current_dir()?,
        };
        base.join(expanded)
    };

    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
