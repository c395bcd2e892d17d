//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while assembling settings at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' not found. Set it or add it to .env")]
    MissingEnv(String),

    #[error("{what} not found in: {path}{hint}")]
    MissingFile {
        what: &'static str,
        path: String,
        hint: String,
    },

    #[error("Invalid settings file {path}: {reason}")]
    InvalidTunables { path: String, reason: String },
}

// ── Notebook UI errors ────────────────────────────────────────────────────────

/// Errors about the state of the hosted notebook as read from its web UI.
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("The circle indicator has not been found in the page.")]
    IndicatorNotFound,

    #[error("The circle indicator has found in the page, but has an unknown color: {0}")]
    UnknownIndicatorColor(String),

    #[error("The page appears to be still loading after {0} seconds")]
    StillLoading(u64),

    #[error("The hardware is not uniquely defined ({visible} accelerator options visible).")]
    HardwareNotUnique { visible: usize },

    #[error("Kaggle is already running. Close it first: choose 5 in the menu")]
    AlreadyRunning,

    #[error("Kaggle did not turn on despite the attempt")]
    DidNotStart,

    #[error("'{what}' did not become visible within {secs} seconds")]
    ElementTimeout { what: String, secs: u64 },

    #[error("Login did not complete within {0} seconds. Check credentials")]
    LoginTimeout(u64),
}

// ── Tunnel errors ─────────────────────────────────────────────────────────────

/// Errors while scraping the tunnel endpoint from the page.
#[derive(Debug, Error)]
pub enum TunnelError {
    #[error("There is no text in page.")]
    NoPageText,

    #[error("ngrok address not found after {attempts} attempts")]
    NotFound { attempts: u32 },

    #[error("The port is not an integer: {0}")]
    InvalidPort(String),

    #[error("Malformed tunnel address: {0}")]
    InvalidEndpoint(String),
}

// ── Remote shell errors ───────────────────────────────────────────────────────

/// Errors raised by commands executed over SSH.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote command exited with code {code}:\n{stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid Syncthing device id: {0}")]
    InvalidDeviceId(String),
}

// ── Syncthing errors ──────────────────────────────────────────────────────────

/// Errors raised while reconciling the local Syncthing peer list.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Syncthing did not start at {url} within {millis} ms")]
    GuiUnreachable { url: String, millis: u64 },

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("Malformed Syncthing configuration: {0}")]
    MalformedConfig(String),
}

// ── Menu errors ───────────────────────────────────────────────────────────────

/// Errors raised while interpreting the user's menu choice.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Wrong user input: {0}. Choose a number from 1 to 5")]
    OutOfRange(u8),
}
