//! JSON output helpers for `--json`.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a run outcome as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_outcome<T: Serialize>(outcome: &T) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("JSON serialization failed")
}

/// Stable machine-readable code for an error chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::{ConfigError, MenuError, NotebookError, RemoteError, SyncError, TunnelError};
    if err.downcast_ref::<ConfigError>().is_some() {
        "config"
    } else if err.downcast_ref::<MenuError>().is_some() {
        "menu"
    } else if err.downcast_ref::<NotebookError>().is_some() {
        "notebook"
    } else if err.downcast_ref::<TunnelError>().is_some() {
        "tunnel"
    } else if err.downcast_ref::<RemoteError>().is_some() {
        "remote"
    } else if err.downcast_ref::<SyncError>().is_some() {
        "sync"
    } else {
        "internal"
    }
}
