use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ApplicationNotFound,
    Other,
}

/// Phrases launcher wrappers print when the named application is missing.
///
/// `-10814` is LaunchServices' `kLSApplicationNotFoundErr`.
const NOT_FOUND_PHRASES: &[&str] = &[
    "unable to find application",
    "can't find application",
    "application not found",
    "error -10814",
];

pub fn classify_spawn_error(err: &io::Error) -> FailureKind {
    match err.kind() {
        io::ErrorKind::NotFound => FailureKind::ApplicationNotFound,
        _ => FailureKind::Other,
    }
}

pub fn classify_handoff_stderr(stderr: &str) -> FailureKind {
    let lower = stderr.to_lowercase();
    if NOT_FOUND_PHRASES.iter().any(|p| lower.contains(p)) {
        FailureKind::ApplicationNotFound
    } else {
        FailureKind::Other
    }
}
