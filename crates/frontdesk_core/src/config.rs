//! Application configuration.
//!
//! # Responsibility
//! - Load `AppConfig` from an optional TOML file.
//! - Map configuration onto store options.
//!
//! # Invariants
//! - A missing file yields defaults; a malformed file is an error.
//! - Unknown keys are rejected.

use crate::logging::default_log_level;
use crate::store::link::EmployeeLinkMode;
use crate::store::reception_store::{StoreOptions, DEFAULT_COMPLETION_GRACE_MS};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Data file used when no config overrides it.
pub const DEFAULT_DATA_FILE: &str = "frontdesk.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite file holding the persisted state slot.
    pub data_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling logs; logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub completion_grace_ms: u64,
    pub link_mode: EmployeeLinkMode,
    /// Dispatch appointment notices through the log notifier.
    pub notifications: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
            completion_grace_ms: DEFAULT_COMPLETION_GRACE_MS,
            link_mode: EmployeeLinkMode::ByName,
            notifications: false,
        }
    }
}

impl AppConfig {
    /// Loads config from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parses and validates config text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_path cannot be empty".to_string()));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            link_mode: self.link_mode,
            completion_grace_ms: self.completion_grace_ms,
        }
    }
}
