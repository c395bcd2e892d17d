//! Domain types for kaggle-ssh configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access. Reading the
//! environment and the settings file happens in `crate::infra::config`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Required environment ─────────────────────────────────────────────────────

pub const ENV_NOTEBOOK_URL: &str = "URL_NOTEBOOK_KAGGLE";
pub const ENV_ACCOUNT: &str = "MAIL_USERNAME_KAGGLE";
pub const ENV_PASSWORD: &str = "PASSWORD_KAGGLE";
pub const ENV_NGROK_TOKEN: &str = "NGROK_TOKEN";
pub const ENV_EDITOR: &str = "PATH_VSCODE";
pub const ENV_SYNC_DEVICE_ID: &str = "ID_SYNCTHING";
pub const ENV_SYNC_FOLDER_ID: &str = "ID_FOLDER_TO_SHARE_SYNCTHING";
pub const ENV_SYNCTRAYZOR: &str = "PATH_SYNCTRAYZOR";
pub const ENV_SYNCTHING: &str = "PATH_SYNCTHING";

/// Every variable that must be set, in the order they are checked.
pub const REQUIRED_ENV: &[&str] = &[
    ENV_NOTEBOOK_URL,
    ENV_ACCOUNT,
    ENV_PASSWORD,
    ENV_NGROK_TOKEN,
    ENV_EDITOR,
    ENV_SYNC_DEVICE_ID,
    ENV_SYNC_FOLDER_ID,
    ENV_SYNCTRAYZOR,
    ENV_SYNCTHING,
];

/// Credentials, identifiers and local tool paths supplied by the environment.
#[derive(Clone)]
pub struct Settings {
    pub notebook_url: String,
    pub account: String,
    pub account_password: String,
    pub ngrok_token: String,
    pub editor_path: PathBuf,
    pub sync_device_id: String,
    pub sync_folder_id: String,
    pub synctrayzor_path: PathBuf,
    pub syncthing_path: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("notebook_url", &self.notebook_url)
            .field("account", &self.account)
            .field("editor_path", &self.editor_path)
            .field("sync_device_id", &self.sync_device_id)
            .field("sync_folder_id", &self.sync_folder_id)
            .field("synctrayzor_path", &self.synctrayzor_path)
            .field("syncthing_path", &self.syncthing_path)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Build settings from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] naming the first absent variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).ok_or_else(|| ConfigError::MissingEnv(name.to_string()));
        Ok(Self {
            notebook_url: get(ENV_NOTEBOOK_URL)?,
            account: get(ENV_ACCOUNT)?,
            account_password: get(ENV_PASSWORD)?,
            ngrok_token: get(ENV_NGROK_TOKEN)?,
            editor_path: PathBuf::from(get(ENV_EDITOR)?),
            sync_device_id: get(ENV_SYNC_DEVICE_ID)?,
            sync_folder_id: get(ENV_SYNC_FOLDER_ID)?,
            synctrayzor_path: PathBuf::from(get(ENV_SYNCTRAYZOR)?),
            syncthing_path: PathBuf::from(get(ENV_SYNCTHING)?),
        })
    }
}

// ── Tunables (settings file) ─────────────────────────────────────────────────

/// Optional knobs stored in `~/.kaggle-ssh/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Tunables {
    pub browser: BrowserConfig,
    pub polling: PollingConfig,
    pub remote: RemoteConfig,
    pub paths: PathsConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run Chromium without a window.
    pub headless: bool,
    /// Upper bound for the login page load and the post-login redirect.
    pub login_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            login_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollingConfig {
    /// Samples of the status indicator before giving up.
    pub status_timeout_secs: u64,
    /// Delay between samples of any UI poll.
    pub interval_ms: u64,
    /// Reads of the page text while looking for the tunnel address.
    pub tunnel_attempts: u32,
    /// Pause after the session starts, before typing into the console.
    pub settle_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_timeout_secs: 120,
            interval_ms: 1000,
            tunnel_attempts: 120,
            settle_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    pub user: String,
    /// Folder the editor opens on the notebook.
    pub folder: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            user: "root".to_string(),
            folder: "/root".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Public key installed on the notebook for password-less login.
    pub public_key: PathBuf,
    /// Directory holding `open_ngrok_ssh_kaggle.ipynb` and
    /// `install_command.sh`; the embedded copies are used when unset.
    pub assets_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            public_key: PathBuf::from("id_rsa.pub"),
            assets_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Force Syncthing integration on or off; platform default when unset.
    pub enabled: Option<bool>,
    /// Device name given to the notebook, also used to find stale entries.
    pub folder_name: String,
    /// Syncthing `config.xml`; platform default when unset.
    pub config_path: Option<PathBuf>,
    pub gui_url: String,
    pub startup_timeout_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            folder_name: "kaggle_TMP".to_string(),
            config_path: None,
            gui_url: "http://127.0.0.1:8384".to_string(),
            startup_timeout_ms: 20_000,
        }
    }
}

impl SyncConfig {
    /// Whether to reconcile Syncthing peers on `os` (a `std::env::consts::OS`
    /// value). Defaults to Windows only, where SyncTrayzor runs.
    #[must_use]
    pub fn enabled_on(&self, os: &str) -> bool {
        self.enabled.unwrap_or(os == "windows")
    }
}

/// Parse the YAML settings file.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTunables`] if the YAML does not match the
/// schema.
pub fn parse_tunables(yaml: &str, path: &str) -> Result<Tunables, ConfigError> {
    if yaml.trim().is_empty() {
        return Ok(Tunables::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidTunables {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
