//! Infrastructure configuration: process environment and the YAML
//! settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::EnvSource;
use crate::domain::config::{Tunables, parse_tunables};

/// Env var overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "KAGGLE_SSH_CONFIG";

/// Process environment, after loading `.env` from the working directory.
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load `.env` (if present) into the process environment.
    ///
    /// Variables already set win over the file.
    #[must_use]
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// YAML settings file on disk.
pub struct YamlTunablesStore;

impl YamlTunablesStore {
    /// Location of the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".kaggle-ssh").join("config.yaml"))
    }

    /// Load the settings file; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Tunables> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(Tunables::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Ok(parse_tunables(&content, &path.display().to_string())?)
    }
}

/// Default location of Syncthing's `config.xml` on this platform.
#[must_use]
pub fn default_syncthing_config() -> Option<PathBuf> {
    #[cfg(windows)]
    return dirs::data_local_dir().map(|d| d.join("Syncthing").join("config.xml"));
    #[cfg(target_os = "macos")]
    return dirs::home_dir().map(|h| {
        h.join("Library")
            .join("Application Support")
            .join("Syncthing")
            .join("config.xml")
    });
    #[cfg(not(any(windows, target_os = "macos")))]
    dirs::state_dir()
        .map(|d| d.join("syncthing").join("config.xml"))
        .or_else(|| dirs::config_dir().map(|d| d.join("syncthing").join("config.xml")))
}
