//! Configuration file handling
//!
//! Settings come from a TOML file, looked up in this order:
//!
//! 1. the path given with `--config`
//! 2. `./reconciler.toml`
//! 3. `~/.config/reconciler/config.toml` (platform config dir, via `dirs`)
//!
//! With no file, built-in defaults apply. Command line flags override file
//! values.
//!
//! ```toml
//! writer = "csv"
//! delimiter = ";"
//!
//! [reconcile]
//! key = ["invoice", "line"]
//!
//! [reconcile.comparators]
//! amount = "numeric:0.005"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::services::ReconcileConfig;
use crate::error::{ReconcileError, Result};
use crate::registry::{ReconcilerRegistry, WriterRegistry};

/// Project-local configuration filename
pub const LOCAL_CONFIG: &str = "reconciler.toml";

/// Subdirectory of the user config dir
const APP_DIR: &str = "reconciler";

/// Filename inside the user config dir
const USER_CONFIG: &str = "config.toml";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Writer name
    pub writer: String,

    /// Reconciler name
    pub reconciler: String,

    /// CSV field delimiter
    pub delimiter: char,

    /// Skip malformed input rows instead of failing
    pub skip_malformed: bool,

    /// Reconciliation settings
    pub reconcile: ReconcileConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            writer: WriterRegistry::DEFAULT.to_string(),
            reconciler: ReconcilerRegistry::DEFAULT.to_string(),
            delimiter: ',',
            skip_malformed: false,
            reconcile: ReconcileConfig::default(),
        }
    }
}

impl AppConfig {
    /// User-level config file path
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_CONFIG))
    }

    /// The config file that applies, if any
    ///
    /// An explicit path is returned as-is even if it does not exist, so that
    /// loading reports it as missing.
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    /// Load configuration following the lookup order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found; using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReconcileError::config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        debug!("loading config from {}", path.display());
        Self::parse(&content).map_err(|e| match e {
            ReconcileError::Configuration(message) => {
                ReconcileError::config(format!("{}: {message}", path.display()))
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ReconcileError::config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that TOML typing cannot
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        self.reconcile.validate()
    }

    /// The delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ReconcileError::config(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}
