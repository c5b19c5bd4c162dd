use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("no handler could open '{target}': {detail}")]
    OpenFailed { target: String, detail: String },
}

#[async_trait]
pub trait ShellActions: Send + Sync {
    /// Show the path in the platform file manager. Fire-and-forget.
    async fn reveal(&self, path: &str);

    /// Open the path with whatever the OS has registered for it.
    async fn open_default(&self, path: &str) -> Result<(), ShellError>;

    async fn open_url(&self, url: &str) -> Result<(), ShellError>;
}

/// Shell actions backed by `opener`, which hands targets to the OS
/// (`ShellExecuteW`, `open`, `xdg-open`) without going through a command
/// interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl SystemShell {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<F, E>(target: &str, f: F) -> Result<(), ShellError>
where
    F: FnOnce() -> Result<(), E> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let failed = |detail: String| ShellError::OpenFailed {
        target: target.to_string(),
        detail,
    };
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(failed(e.to_string())),
        Err(e) => Err(failed(e.to_string())),
    }
}

#[async_trait]
impl ShellActions for SystemShell {
    async fn reveal(&self, path: &str) {
        let owned = PathBuf::from(path);
        match blocking(path, move || opener::reveal(&owned)).await {
            Ok(()) => return,
            Err(e) => tracing::debug!(path, error = %e, "reveal through the OS failed"),
        }
        reveal_fallback(Path::new(path));
    }

    async fn open_default(&self, path: &str) -> Result<(), ShellError> {
        let owned = path.to_string();
        blocking(path, move || opener::open(&owned)).await
    }

    async fn open_url(&self, url: &str) -> Result<(), ShellError> {
        let owned = url.to_string();
        blocking(url, move || opener::open_browser(&owned)).await
    }
}

#[cfg(all(not(windows), not(target_os = "macos")))]
fn reveal_fallback(path: &Path) {
    use std::process::{Command, Stdio};

    for (program, args) in reveal_attempts(path) {
        let spawned = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => return,
            Err(e) => tracing::debug!(program, error = %e, "reveal attempt failed"),
        }
    }
    tracing::warn!(path = %path.display(), "no file manager could be started");
}

#[cfg(any(windows, target_os = "macos"))]
fn reveal_fallback(path: &Path) {
    tracing::warn!(path = %path.display(), "no file manager could be started");
}

/// File managers to try when the desktop has no `FileManager1` service.
/// None of them can select a file, so a file's directory is opened instead.
#[cfg(all(not(windows), not(target_os = "macos")))]
fn reveal_attempts(path: &Path) -> Vec<(&'static str, Vec<String>)> {
    let dir = if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent().unwrap_or(Path::new("/")).to_path_buf()
    };
    let dir = dir.display().to_string();
    vec![
        ("xdg-open", vec![dir.clone()]),
        ("gio", vec!["open".to_string(), dir.clone()]),
        ("nautilus", vec![dir.clone()]),
        ("dolphin", vec![dir.clone()]),
        ("thunar", vec![dir]),
    ]
}
