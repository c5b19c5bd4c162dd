use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use thiserror::Error;

use crate::app::AppId;

const SECTION: &str = "openin";
const CONFIG_ENV: &str = "OPENIN_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application used when no preference has been recorded.
    pub default_app: AppId,
    /// Location of the preference database.
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_app: AppId::DEFAULT,
            store_path: default_store_path(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/openin/config.ini` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("openin").join("config.ini"))
    }

    /// Load configuration.
    ///
    /// An explicit path (argument, then `OPENIN_CONFIG`) must exist. The
    /// default location is optional and falls back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_file(&path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_ini_str(&content).map_err(|e| match e {
            ConfigError::Read { message, .. } => ConfigError::Read {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.set_comment_symbols(&['#', ';']);
        ini.read(content.to_string())
            .map_err(|message| ConfigError::Read {
                path: "<inline>".to_string(),
                message,
            })?;

        let mut config = Self::default();

        if let Some(value) = ini.get(SECTION, "default_app") {
            config.default_app = value.parse().map_err(|e: crate::app::UnknownApp| {
                ConfigError::Invalid {
                    key: "default_app".to_string(),
                    message: e.to_string(),
                }
            })?;
        }

        if let Some(value) = ini.get(SECTION, "store") {
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "store".to_string(),
                    message: "path is empty".to_string(),
                });
            }
            config.store_path = expand_home(value);
        }

        Ok(config)
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("openin"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("openin.db")
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_ini_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_app, AppId::Cursor);
        assert!(config.store_path.ends_with("openin.db"));
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_ini_str(
            "# user config\n[openin]\ndefault_app = Zed\nstore = /var/tmp/prefs.db\n",
        )
        .unwrap();
        assert_eq!(config.default_app, AppId::Zed);
        assert_eq!(config.store_path, PathBuf::from("/var/tmp/prefs.db"));
    }

    #[test]
    fn test_rejects_unknown_app() {
        let err = Config::from_ini_str("[openin]\ndefault_app = notepad\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "default_app"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.ini"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[openin]\ndefault_app = sublime\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_app, AppId::Sublime);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.db"), home.join("x.db"));
        }
    }
}
