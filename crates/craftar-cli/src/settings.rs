//! Configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use tracing::debug;

use craftar::{Config, RecognitionClient, ResourceClient};

/// Everything a command needs to build its client.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    api_key: Option<String>,
    /// Report each query image transformation at info level.
    pub verbose: bool,
}

impl Context {
    /// Load configuration from `path`, or from the platform config
    /// directory when no path is given. A missing default file means
    /// built-in defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>, api_key: Option<String>, verbosity: u8) -> Result<Self> {
        let config = match path {
            Some(path) => read_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => {
                    debug!("No config file, using defaults");
                    Config::default()
                }
            },
        };

        Ok(Self {
            config,
            api_key: api_key.filter(|key| !key.is_empty()),
            verbose: verbosity > 0,
        })
    }

    #[cfg(test)]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            api_key: None,
            verbose: false,
        }
    }

    pub fn resources(&self) -> Result<ResourceClient> {
        let api_key = self
            .api_key
            .as_deref()
            .context("No API key. Pass --api-key or set CRAFTAR_API_KEY.")?;
        ResourceClient::new(self.config.clone(), api_key).context("Failed to create client")
    }

    pub fn recognition(&self) -> Result<RecognitionClient> {
        RecognitionClient::new(self.config.clone()).context("Failed to create client")
    }
}

/// Get the default config file path.
fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "craftar")?;
    Some(dirs.config_dir().join("config.json"))
}

fn read_config(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "Loading config");
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
