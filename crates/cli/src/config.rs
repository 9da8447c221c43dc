//! Shell configuration file
//!
//! ```toml
//! pretty = true
//! escape = "standard"
//! history_file = ".gentable_history"
//!
//! [table]
//! initial_buckets = 101
//! load_factor = 75
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use gentable_core::{StoreError, TableConfig};
use gentable_json::EscapeMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] StoreError),
}

/// Settings for an interactive session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Sizing of the root table
    pub table: TableConfig,
    /// Render `get` and `show` output indented
    pub pretty: bool,
    /// String escaping in rendered output
    pub escape: EscapeMode,
    /// Line history is loaded from and saved to this file when set
    pub history_file: Option<PathBuf>,
}

impl ShellConfig {
    /// Read and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ShellConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.table.validate()?;
        Ok(config)
    }
}
