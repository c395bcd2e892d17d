//! Application service: commands sent to the notebook over SSH.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, RemoteShell};
use crate::domain::remote::{
    REMOTE_DEVICE_ID_COMMAND, authorized_key_script, encode_batch, remote_add_device_command,
    validate_device_id,
};
use crate::domain::{RemoteError, RemoteOutput, SshCredentials, TunnelEndpoint};

/// Run `command` and turn a non-zero exit into [`RemoteError::CommandFailed`].
async fn exec_checked(
    shell: &impl RemoteShell,
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    command: &str,
) -> Result<RemoteOutput> {
    let output = shell.exec(endpoint, credentials, command).await?;
    if !output.success() {
        return Err(RemoteError::CommandFailed {
            code: output.exit_code,
            stderr: output.stderr,
        }
        .into());
    }
    Ok(output)
}

/// Run a multi-line shell script on the notebook in one session.
///
/// # Errors
///
/// Returns [`RemoteError::CommandFailed`] if the script exits non-zero, or
/// any connection error.
pub async fn run_batch(
    shell: &impl RemoteShell,
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    script: &str,
) -> Result<RemoteOutput> {
    tracing::info!(%endpoint, lines = script.lines().count(), "running remote batch");
    exec_checked(shell, endpoint, credentials, &encode_batch(script)).await
}

/// Install the local public key at `pubkey_path` as the notebook's only
/// authorized key.
///
/// # Errors
///
/// Returns an error if the key cannot be read, is not a valid public key, or
/// the remote command fails.
pub async fn install_pubkey(
    shell: &impl RemoteShell,
    fs: &impl LocalFs,
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    pubkey_path: &Path,
) -> Result<()> {
    let key = fs
        .read_to_string(pubkey_path)
        .with_context(|| format!("reading public key {}", pubkey_path.display()))?;
    let script = authorized_key_script(&key)?;
    exec_checked(shell, endpoint, credentials, &script).await?;
    Ok(())
}

/// Trust the local Syncthing device on the notebook and return the
/// notebook's own device id.
///
/// # Errors
///
/// Returns an error if either id is malformed or a remote command fails.
pub async fn remote_sync_device_id(
    shell: &impl RemoteShell,
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    local_device_id: &str,
) -> Result<String> {
    let add = remote_add_device_command(local_device_id)?;
    exec_checked(shell, endpoint, credentials, &add).await?;

    let output = exec_checked(shell, endpoint, credentials, REMOTE_DEVICE_ID_COMMAND).await?;
    let remote_id = output.stdout.trim().to_string();
    validate_device_id(&remote_id)?;
    tracing::info!(remote_id = %remote_id, "notebook Syncthing device id");
    Ok(remote_id)
}
