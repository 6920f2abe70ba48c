//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Gitlet has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Settings pinned into one repository by `init`
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITLET_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitlet/config.toml`
//! 3. `~/.gitlet/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitlet::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Default branch: {}", config.default_branch().unwrap());
//! println!("Dates shown in: {}", config.date_offset());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::paths::RepoPaths;
use crate::core::store::write_atomic;
use crate::core::types::{BranchName, DateOffset};

/// Branch created by `init` when nothing is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GITLET_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads its `.gitlet/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. Missing files are not an error.
    pub fn load(repo: Option<&RepoPaths>) -> Result<Config, ConfigError> {
        Self::load_from(Self::find_global().as_deref(), repo)
    }

    /// Load configuration from an explicit global file.
    pub fn load_from(
        global_path: Option<&Path>,
        repo: Option<&RepoPaths>,
    ) -> Result<Config, ConfigError> {
        let global = match global_path {
            Some(path) if path.exists() => Self::read_config::<GlobalConfig>(path)?,
            _ => GlobalConfig::default(),
        };
        global.validate()?;

        let repo = match repo.map(RepoPaths::config_path) {
            Some(path) if path.exists() => {
                let config = Self::read_config::<RepoConfig>(&path)?;
                config.validate()?;
                Some(config)
            }
            _ => None,
        };

        debug!(
            global = ?global_path,
            has_repo_config = repo.is_some(),
            "loaded configuration"
        );

        Ok(Config {
            global,
            repo,
            global_path: global_path.map(Path::to_path_buf),
        })
    }

    /// First existing global config file in search order.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitlet/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitlet/config.toml"))
            .filter(|path| path.exists())
    }

    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write repo config atomically.
    pub fn write_repo(repo: &RepoPaths, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        let path = repo.config_path();
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        write_atomic(&path, contents.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Branch created by `init`.
    ///
    /// Defaults to "master" if not configured.
    pub fn default_branch(&self) -> Result<BranchName, ConfigError> {
        let name = self
            .global
            .default_branch
            .as_deref()
            .unwrap_or(DEFAULT_BRANCH);
        BranchName::new(name).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Offset used to render commit dates.
    ///
    /// Repo config wins over global; defaults to `-0800`.
    pub fn date_offset(&self) -> DateOffset {
        self.repo
            .as_ref()
            .and_then(|r| r.date_offset.as_deref())
            .or(self.global.date_offset.as_deref())
            .and_then(|s| DateOffset::parse(s).ok())
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }
}
