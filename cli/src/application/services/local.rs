//! Application service: local side effects: editor launch and Syncthing
//! peer reconciliation.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, HttpProbe, LocalFs, ProgressReporter};
use crate::domain::remote::editor_folder_uri;
use crate::domain::syncthing::{add_device_args, clear_devices_named, share_folder_args};
use crate::domain::{ConfigError, Settings, SshCredentials, SyncError, Tunables, TunnelEndpoint};

/// How the editor step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorLaunch {
    Opened,
    /// The editor binary is missing; the user was shown how to connect.
    Skipped { uri: String },
}

/// Open the editor on `folder` of the notebook over remote-SSH.
///
/// When the editor binary does not exist the equivalent command and the SSH
/// password are reported instead, and the run continues.
///
/// # Errors
///
/// Returns an error if the editor cannot be spawned or exits non-zero.
pub async fn open_editor(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    editor: &Path,
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    folder: &str,
) -> Result<EditorLaunch> {
    let uri = editor_folder_uri(&credentials.user, endpoint, folder);
    reporter.info(&format!(
        "Ready to connect with SSH: {}@{endpoint}",
        credentials.user
    ));

    if !fs.exists(editor) {
        reporter.warn(&format!("Editor not found at {}", editor.display()));
        reporter.info(&format!("Consider using: code --folder-uri \"{uri}\""));
        reporter.info(&format!(
            "The ssh password if needed is: {}",
            credentials.password
        ));
        return Ok(EditorLaunch::Skipped { uri });
    }

    let status = runner
        .run_status(editor, &["--folder-uri", &uri])
        .await
        .with_context(|| format!("launching {}", editor.display()))?;
    anyhow::ensure!(
        status.success(),
        "{} exited with {status}",
        editor.display()
    );
    Ok(EditorLaunch::Opened)
}

/// Local Syncthing installation and the share to set up.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub synctrayzor: PathBuf,
    pub syncthing: PathBuf,
    pub config_path: PathBuf,
    /// Name given to the notebook device; stale entries carry it too.
    pub device_name: String,
    pub folder_id: String,
    pub gui_url: String,
    pub startup_timeout: Duration,
    pub poll_step: Duration,
}

const GUI_POLL_STEP: Duration = Duration::from_millis(100);

/// Local files confirmed to exist before the browser is opened.
#[derive(Debug, Clone)]
pub struct LocalSetup {
    pub public_key: PathBuf,
    pub sync: Option<SyncPlan>,
}

fn require(fs: &impl LocalFs, what: &'static str, path: &Path, hint: &str) -> Result<()> {
    if fs.exists(path) {
        return Ok(());
    }
    Err(ConfigError::MissingFile {
        what,
        path: path.display().to_string(),
        hint: hint.to_string(),
    }
    .into())
}

/// Check the public key and, when Syncthing integration is enabled on `os`,
/// the editor, the SyncTrayzor and Syncthing binaries and Syncthing's
/// `config.xml`.
///
/// `default_config` is used when `sync.config_path` is unset.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] for the first missing path.
pub fn check_local_setup(
    fs: &impl LocalFs,
    settings: &Settings,
    tunables: &Tunables,
    os: &str,
    default_config: Option<PathBuf>,
) -> Result<LocalSetup> {
    let public_key = tunables.paths.public_key.clone();
    require(
        fs,
        "Public ssh key",
        &public_key,
        ". Generate one using 'ssh-keygen -t rsa' and copy the public key here",
    )?;

    if !tunables.sync.enabled_on(os) {
        return Ok(LocalSetup {
            public_key,
            sync: None,
        });
    }

    require(fs, "Editor binary", &settings.editor_path, "")?;
    require(fs, "SyncTrayzor binary", &settings.synctrayzor_path, "")?;
    require(fs, "Syncthing binary", &settings.syncthing_path, "")?;
    let config_path = tunables
        .sync
        .config_path
        .clone()
        .or(default_config)
        .context("cannot locate Syncthing config.xml; set sync.config_path")?;
    require(fs, "Syncthing configuration", &config_path, "")?;

    Ok(LocalSetup {
        public_key,
        sync: Some(SyncPlan {
            synctrayzor: settings.synctrayzor_path.clone(),
            syncthing: settings.syncthing_path.clone(),
            config_path,
            device_name: tunables.sync.folder_name.clone(),
            folder_id: settings.sync_folder_id.clone(),
            gui_url: tunables.sync.gui_url.clone(),
            startup_timeout: Duration::from_millis(tunables.sync.startup_timeout_ms),
            poll_step: GUI_POLL_STEP,
        }),
    })
}

fn check_tool(output: &Output, tool: &Path) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(SyncError::ToolFailed {
        tool: tool.display().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
    .into())
}

/// Poll `url` every `step` until it answers or `timeout` elapses.
///
/// # Errors
///
/// Returns [`SyncError::GuiUnreachable`] on timeout.
pub async fn wait_for_gui(
    http: &impl HttpProbe,
    url: &str,
    timeout: Duration,
    step: Duration,
) -> Result<()> {
    let mut waited = Duration::ZERO;
    loop {
        if http.is_reachable(url).await {
            return Ok(());
        }
        if waited >= timeout {
            break;
        }
        tokio::time::sleep(step).await;
        waited += step.max(Duration::from_millis(1));
    }
    Err(SyncError::GuiUnreachable {
        url: url.to_string(),
        millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    }
    .into())
}

/// Replace the notebook peer in the local Syncthing and share the folder
/// with `remote_device_id`.
///
/// SyncTrayzor is stopped while `config.xml` is edited, then restarted
/// minimized; the Syncthing CLI needs its GUI up before it accepts changes.
///
/// # Errors
///
/// Returns an error if any tool fails, the configuration cannot be edited,
/// or the GUI does not come up in time.
pub async fn reconcile_sync(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    http: &impl HttpProbe,
    reporter: &impl ProgressReporter,
    plan: &SyncPlan,
    remote_device_id: &str,
) -> Result<()> {
    reporter.step("stopping SyncTrayzor...");
    let output = runner.run(&plan.synctrayzor, &["--shutdown"]).await?;
    check_tool(&output, &plan.synctrayzor)?;

    let xml = fs.read_to_string(&plan.config_path)?;
    let edited = clear_devices_named(&xml, &plan.device_name)?;
    fs.write_atomic(&plan.config_path, &edited.xml)?;
    reporter.info(&format!(
        "Cleaned {} stale device(s) from {}",
        edited.cleared,
        plan.config_path.display()
    ));

    reporter.step("restarting SyncTrayzor...");
    runner.spawn_detached(&plan.synctrayzor, &["--minimized"])?;
    wait_for_gui(http, &plan.gui_url, plan.startup_timeout, plan.poll_step).await?;

    let add = add_device_args(remote_device_id, &plan.device_name);
    let add: Vec<&str> = add.iter().map(String::as_str).collect();
    let output = runner.run(&plan.syncthing, &add).await?;
    check_tool(&output, &plan.syncthing)?;

    let share = share_folder_args(&plan.folder_id, remote_device_id);
    let share: Vec<&str> = share.iter().map(String::as_str).collect();
    let output = runner.run(&plan.syncthing, &share).await?;
    check_tool(&output, &plan.syncthing)?;

    reporter.success(&format!("shared Syncthing folder {}", plan.folder_id));
    Ok(())
}
