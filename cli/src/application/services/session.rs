//! Application service: session orchestration: login, start, shut down.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::{
    CommandRunner, HttpProbe, LocalFs, NotebookPage, ProgressReporter, RemoteShell,
};
use crate::application::services::console::run_in_console;
use crate::application::services::hardware::select_hardware;
use crate::application::services::local::{EditorLaunch, SyncPlan, open_editor, reconcile_sync};
use crate::application::services::remote::{install_pubkey, remote_sync_device_id, run_batch};
use crate::application::services::status::{IndicatorProbe, wait_until_settled};
use crate::application::services::tunnel::scrape_endpoint;
use crate::domain::config::PollingConfig;
use crate::domain::{Accelerator, NotebookError, SshCredentials, TunnelEndpoint, UiTarget};

pub const LOGIN_URL: &str = "https://www.kaggle.com/account/login?phase=emailSignIn&returnUrl=%2F";
pub const HOME_URL: &str = "https://www.kaggle.com/";
const EDITOR_FRAME: &str = r#"iframe[name="notebook-editor-cells"]"#;

// ── Login ────────────────────────────────────────────────────────────────────

/// Account and page to open.
pub struct Login<'a> {
    pub notebook_url: &'a str,
    pub account: &'a str,
    pub password: &'a str,
    /// Bound for each navigation and each wait of the login flow.
    pub timeout: Duration,
    pub interval: Duration,
}

fn poll_attempts(timeout: Duration, interval: Duration) -> u128 {
    (timeout.as_millis() / interval.as_millis().max(1)).max(1)
}

/// Poll until `target` is visible.
///
/// # Errors
///
/// Returns [`NotebookError::ElementTimeout`] when `timeout` elapses first.
pub async fn wait_visible(
    page: &impl NotebookPage,
    target: &UiTarget,
    timeout: Duration,
    interval: Duration,
) -> Result<()> {
    for _ in 0..poll_attempts(timeout, interval) {
        if page.is_visible(target).await? {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }
    Err(NotebookError::ElementTimeout {
        what: target.to_string(),
        secs: timeout.as_secs(),
    }
    .into())
}

async fn wait_for_url(page: &impl NotebookPage, url: &str, login: &Login<'_>) -> Result<()> {
    for _ in 0..poll_attempts(login.timeout, login.interval) {
        if page.current_url().await? == url {
            return Ok(());
        }
        tokio::time::sleep(login.interval).await;
    }
    Err(NotebookError::LoginTimeout(login.timeout.as_secs()).into())
}

/// Sign in and open the notebook editor, waiting until its cells are
/// interactive.
///
/// # Errors
///
/// Returns [`NotebookError::LoginTimeout`] if the sign-in never redirects
/// home, [`NotebookError::ElementTimeout`] if the editor never loads, or any
/// UI error.
pub async fn open_notebook(page: &impl NotebookPage, login: &Login<'_>) -> Result<()> {
    page.goto(LOGIN_URL, login.timeout).await?;
    page.fill(
        &UiTarget::placeholder("Enter your email address or username"),
        login.account,
    )
    .await?;
    page.fill(&UiTarget::placeholder("Enter password"), login.password)
        .await?;
    let cookies = UiTarget::text("OK, Got it.");
    if page.is_visible(&cookies).await? {
        page.click(&cookies).await?;
    }
    page.click(&UiTarget::button("Sign In")).await?;
    wait_for_url(page, HOME_URL, login).await?;
    tracing::info!("login completed");

    page.goto(login.notebook_url, login.timeout).await?;
    // The cell's run button is the last thing to load.
    let execute = UiTarget::Chain(vec![
        UiTarget::Frame(EDITOR_FRAME.to_string()),
        UiTarget::button("Execute cell"),
    ]);
    wait_visible(page, &execute, login.timeout, login.interval).await?;
    tracing::info!(url = login.notebook_url, "notebook editor ready");
    Ok(())
}

// ── Polling knobs ────────────────────────────────────────────────────────────

/// Timing of the UI polls during a run.
#[derive(Debug, Clone, Copy)]
pub struct Polling {
    pub status_timeout_secs: u64,
    pub interval: Duration,
    pub tunnel_attempts: u32,
    pub settle: Duration,
}

impl From<&PollingConfig> for Polling {
    fn from(cfg: &PollingConfig) -> Self {
        Self {
            status_timeout_secs: cfg.status_timeout_secs,
            interval: Duration::from_millis(cfg.interval_ms),
            tunnel_attempts: cfg.tunnel_attempts,
            settle: Duration::from_secs(cfg.settle_secs),
        }
    }
}

// ── Shutdown ─────────────────────────────────────────────────────────────────

/// Outcome of [`shut_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownOutcome {
    AlreadyOff,
    TurnedOff,
    StillRunning,
}

/// Stop the notebook session if it is running.
///
/// # Errors
///
/// Returns an error if the status cannot be read or the menu cannot be used.
pub async fn shut_down(
    page: &impl NotebookPage,
    polling: Polling,
    reporter: &impl ProgressReporter,
) -> Result<ShutdownOutcome> {
    let probe = IndicatorProbe::new(page);
    if !wait_until_settled(&probe, polling.status_timeout_secs, polling.interval).await? {
        reporter.success("Kaggle notebook was already off");
        return Ok(ShutdownOutcome::AlreadyOff);
    }

    reporter.step("stopping session...");
    page.click(&UiTarget::label("More settings")).await?;
    page.click(&UiTarget::Chain(vec![
        UiTarget::role("menu"),
        UiTarget::text("power_settings_newStop session"),
    ]))
    .await?;

    if wait_until_settled(&probe, polling.status_timeout_secs, polling.interval).await? {
        reporter.warn("Unable to turn off");
        Ok(ShutdownOutcome::StillRunning)
    } else {
        reporter.success("Turned off kaggle notebook");
        Ok(ShutdownOutcome::TurnedOff)
    }
}

// ── Start ────────────────────────────────────────────────────────────────────

/// Everything [`start_session`] needs besides its ports.
#[derive(Debug, Clone)]
pub struct StartPlan {
    pub accelerator: Accelerator,
    pub polling: Polling,
    pub credentials: SshCredentials,
    /// Console code that starts sshd and the tunnel; secrets already injected.
    pub tunnel_script: String,
    /// Shell script run over SSH once the tunnel is up.
    pub install_script: String,
    pub public_key: PathBuf,
    pub editor: PathBuf,
    pub remote_folder: String,
    pub local_sync_id: String,
    /// Present when Syncthing integration is enabled.
    pub sync: Option<SyncPlan>,
}

/// Outcome of [`start_session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub endpoint: TunnelEndpoint,
    pub previous_hardware: Accelerator,
    pub hardware: Accelerator,
    pub editor_opened: bool,
    pub remote_sync_id: Option<String>,
}

/// Start the notebook with the planned hardware and wire it up locally.
///
/// # Errors
///
/// - [`NotebookError::AlreadyRunning`] if a session is already up.
/// - [`NotebookError::DidNotStart`] if the session is off after selecting
///   the hardware.
/// - Any error of the individual steps; nothing is retried.
pub async fn start_session(
    page: &impl NotebookPage,
    shell: &impl RemoteShell,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    http: &impl HttpProbe,
    reporter: &impl ProgressReporter,
    plan: &StartPlan,
) -> Result<SessionOutcome> {
    let polling = plan.polling;
    let probe = IndicatorProbe::new(page);

    reporter.step("checking notebook status...");
    if wait_until_settled(&probe, polling.status_timeout_secs, polling.interval).await? {
        return Err(NotebookError::AlreadyRunning.into());
    }

    reporter.step(&format!("starting with {}...", plan.accelerator.describe()));
    let change = select_hardware(page, plan.accelerator, reporter).await?;
    if !wait_until_settled(&probe, polling.status_timeout_secs, polling.interval).await? {
        return Err(NotebookError::DidNotStart.into());
    }
    reporter.success(&format!(
        "notebook running on {} (was {})",
        change.selected, change.previous
    ));

    tokio::time::sleep(polling.settle).await;
    run_in_console(page, &plan.tunnel_script, false).await?;

    reporter.step("waiting for the tunnel address...");
    let endpoint = scrape_endpoint(page, polling.tunnel_attempts, polling.interval).await?;
    run_in_console(page, "", true).await?;
    reporter.success(&format!("tunnel at {endpoint}"));

    reporter.step("installing tools on the notebook (takes several minutes)...");
    run_batch(shell, &endpoint, &plan.credentials, &plan.install_script).await?;
    install_pubkey(shell, fs, &endpoint, &plan.credentials, &plan.public_key).await?;
    reporter.success("public key installed");

    let editor = open_editor(
        runner,
        fs,
        reporter,
        &plan.editor,
        &endpoint,
        &plan.credentials,
        &plan.remote_folder,
    )
    .await?;

    let remote_sync_id = match &plan.sync {
        Some(sync) => {
            reporter.step("pairing Syncthing...");
            let remote_id =
                remote_sync_device_id(shell, &endpoint, &plan.credentials, &plan.local_sync_id)
                    .await?;
            reconcile_sync(runner, fs, http, reporter, sync, &remote_id).await?;
            Some(remote_id)
        }
        None => None,
    };

    Ok(SessionOutcome {
        endpoint,
        previous_hardware: change.previous,
        hardware: change.selected,
        editor_opened: editor == EditorLaunch::Opened,
        remote_sync_id,
    })
}
