//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::{RemoteOutput, RunStatus, SshCredentials, TunnelEndpoint, UiTarget};

// ── Notebook UI Port ──────────────────────────────────────────────────────────

/// Primitive operations on the notebook page.
///
/// Implementations own exactly one live browser page; every method fails if
/// that page is gone. Queries (`is_visible`, `body_text`, …) never wait for an
/// element to appear; actions (`click`, `fill`, `press`) wait for it the way
/// the automation driver does by default.
#[allow(async_fn_in_trait)]
pub trait NotebookPage {
    /// Navigate to `url` and wait for the load event.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;
    /// Current page URL.
    async fn current_url(&self) -> Result<String>;
    /// Whether the first element matching `target` is visible right now.
    async fn is_visible(&self, target: &UiTarget) -> Result<bool>;
    /// Click the element.
    async fn click(&self, target: &UiTarget) -> Result<()>;
    /// Replace the value of an input.
    async fn fill(&self, target: &UiTarget, text: &str) -> Result<()>;
    /// Press a key (e.g. `"Enter"`) while the element has focus.
    async fn press(&self, target: &UiTarget, key: &str) -> Result<()>;
    /// Rendered text of the element.
    async fn inner_text(&self, target: &UiTarget) -> Result<String>;
    /// Text content of every matching element.
    async fn text_contents(&self, target: &UiTarget) -> Result<Vec<String>>;
    /// Computed CSS `color` of the element.
    async fn computed_color(&self, target: &UiTarget) -> Result<String>;
    /// Text content of `<body>`, `None` when the page has no body text.
    async fn body_text(&self) -> Result<Option<String>>;
}

// ── Status Port ───────────────────────────────────────────────────────────────

/// Narrow view of the notebook's run state. Callers that only need the state
/// depend on this, so the UI coupling behind it can change freely.
#[allow(async_fn_in_trait)]
pub trait StatusProbe {
    /// Read the current state once.
    async fn current_state(&self) -> Result<RunStatus>;
}

// ── Remote Shell Port ─────────────────────────────────────────────────────────

/// Command execution on the notebook over SSH.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Open a session to `endpoint`, run `command` to completion and return
    /// its output. Host keys are not verified.
    async fn exec(
        &self,
        endpoint: &TunnelEndpoint,
        credentials: &SshCredentials,
        command: &str,
    ) -> Result<RemoteOutput>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts local process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &Path, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &Path, args: &[&str], timeout: Duration)
    -> Result<Output>;
    /// Start a program that outlives this process (tray applications).
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn spawn_detached(&self, program: &Path, args: &[&str]) -> Result<()>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &Path, args: &[&str]) -> Result<ExitStatus>;
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Abstracts HTTP reachability checks so services can be tested without
/// real network access.
#[allow(async_fn_in_trait)]
pub trait HttpProbe {
    /// `true` if anything answers an HTTP GET on `url`, whatever the status.
    async fn is_reachable(&self, url: &str) -> bool;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the few local file operations the services perform.
pub trait LocalFs {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Replace a file's content without leaving it half written.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()>;
}

// ── Environment Port ──────────────────────────────────────────────────────────

/// Source of environment variables (process env, `.env`, or a test map).
pub trait EnvSource {
    /// Value of `name`, `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an informational detail.
    fn info(&self, message: &str);
}
