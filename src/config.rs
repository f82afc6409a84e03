//! Application configuration.
//!
//! Data files live in the working directory by default; the log and the
//! shell history go under `~/.taskmgr/`. An optional `taskmgr.json` in the
//! working directory overrides any of these.

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::logging::LogConfig;
use crate::shell::history::HistoryConfig;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "taskmgr.json";

/// On-disk shape of `taskmgr.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub history_file: Option<PathBuf>,
    pub history_size: Option<usize>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `user.txt`, `tasks.txt` and the reports.
    pub data_dir: PathBuf,
    pub log: LogConfig,
    pub history: HistoryConfig,
}

/// Directory for the log and history, `~/.taskmgr` when a home exists.
pub fn state_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|home| home.join(".taskmgr"))
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(".");
        let state = state_dir().unwrap_or_else(|| data_dir.clone());
        Self {
            log: LogConfig::new(state.join("taskmgr.log")),
            history: HistoryConfig::new(state.join("history")),
            data_dir,
        }
    }
}

impl AppConfig {
    /// Loads `taskmgr.json` from the working directory if present.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads the given config file, falling back to defaults when it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Self::default().merge(file)
    }

    fn merge(mut self, file: ConfigFile) -> Result<Self> {
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(path) = file.log_file {
            self.log.path = path;
        }
        if let Some(level) = file.log_level {
            let level = LevelFilter::from_str(&level)
                .map_err(|_| anyhow!("Unknown log level '{}'", level))?;
            self.log = self.log.with_level(level);
        }
        if let Some(path) = file.history_file {
            self.history.path = path;
        }
        if let Some(size) = file.history_size {
            self.history = self.history.with_max_entries(size);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.log.level, LevelFilter::Info);
        assert!(config.log.path.ends_with("taskmgr.log"));
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "data_dir": "/srv/tasks", "log_level": "debug", "history_size": 50 }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/tasks"));
        assert_eq!(config.log.level, LevelFilter::Debug);
        assert_eq!(config.history.max_entries, 50);
    }

    #[test]
    fn test_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        std::fs::write(&path, r#"{ "log_level": "loud" }"#).unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        std::fs::write(&path, r#"{ "colour": true }"#).unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
