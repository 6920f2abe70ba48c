//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITLET_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitlet/config.toml`
//! 3. `~/.gitlet/config.toml`
//!
//! # Repo Config
//!
//! Located at `.gitlet/config.toml`, written by `init`.
//!
//! # Validation
//!
//! Config values are validated after parsing (branch names must be valid,
//! offsets must look like `-0800`).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{BranchName, DateOffset};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_branch = "main"
/// date_offset = "+0000"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Branch created by `init` (default: "master")
    pub default_branch: Option<String>,

    /// Offset used to render commit dates in `log`
    pub date_offset: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(branch) = &self.default_branch {
            BranchName::new(branch.as_str()).map_err(|e| {
                ConfigError::InvalidValue(format!("default_branch '{branch}': {e}"))
            })?;
        }
        validate_offset(self.date_offset.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// date_offset = "-0800"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Offset used to render commit dates in `log`
    pub date_offset: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_offset(self.date_offset.as_deref())
    }
}

fn validate_offset(offset: Option<&str>) -> Result<(), ConfigError> {
    if let Some(offset) = offset {
        DateOffset::parse(offset)
            .map_err(|e| ConfigError::InvalidValue(format!("date_offset: {e}")))?;
    }
    Ok(())
}
