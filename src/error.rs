use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dispatch(#[from] crate::orchestrator::DispatchError),

    #[error("preference store error: {0}")]
    Persistence(#[from] crate::store::StoreError),

    #[error(transparent)]
    Shell(#[from] crate::shell::ShellError),

    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("invalid path '{path}': {message}")]
    Path { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
