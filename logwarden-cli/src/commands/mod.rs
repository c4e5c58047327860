//! Command handlers -- one module per subcommand

pub mod check;
pub mod config;

use std::path::{Path, PathBuf};

use logwarden_core::config::{ConfigLoader, ValidatorConfig};
use logwarden_core::error::LogwardenError;

/// Where the effective configuration comes from.
///
/// An explicit `--config` file replaces discovery entirely; otherwise the
/// layered lookup runs from the project root.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    explicit: Option<PathBuf>,
    root: PathBuf,
}

impl ConfigSource {
    pub fn new(explicit: Option<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            explicit,
            root: root.into(),
        }
    }

    /// Project root used for discovery.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Human-readable description for reports.
    pub fn describe(&self) -> String {
        match &self.explicit {
            Some(path) => path.display().to_string(),
            None => format!("discovered from {}", self.root.display()),
        }
    }

    /// Load, schema-check and apply env overrides.
    pub async fn load(&self) -> Result<ValidatorConfig, LogwardenError> {
        match &self.explicit {
            Some(path) => ValidatorConfig::load(path).await,
            None => ConfigLoader::new(&self.root).load().await,
        }
    }
}
