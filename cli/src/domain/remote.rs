//! Shell command construction for the remote notebook and the local editor.
//!
//! Pure string building and validation. Execution goes through the
//! `RemoteShell` and `CommandRunner` ports.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::error::RemoteError;
use crate::domain::tunnel::TunnelEndpoint;

/// Login credentials for the notebook's SSH server.
#[derive(Clone)]
pub struct SshCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for SshCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RemoteOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Wrap a multi-line script into a single-line command that decodes and runs
/// it remotely, so no quoting of the script itself is needed.
#[must_use]
pub fn encode_batch(script: &str) -> String {
    let encoded = STANDARD.encode(script.as_bytes());
    format!("echo '{encoded}' | base64 -d | sh")
}

/// Reverse of [`encode_batch`]; returns `None` for anything it did not produce.
#[must_use]
pub fn decode_batch(command: &str) -> Option<Vec<u8>> {
    let encoded = command
        .strip_prefix("echo '")?
        .strip_suffix("' | base64 -d | sh")?;
    STANDARD.decode(encoded).ok()
}

/// Validate that a public key is safe to embed in single quotes.
///
/// # Errors
///
/// Returns [`RemoteError::InvalidPublicKey`] for unknown key types or keys
/// containing anything beyond base64, spaces and comment punctuation.
pub fn validate_pubkey(key: &str) -> Result<(), RemoteError> {
    let key = key.trim();
    let known_type = ["ssh-ed25519 ", "ssh-rsa ", "ecdsa-sha2-"]
        .iter()
        .any(|prefix| key.starts_with(prefix));
    if !known_type {
        return Err(RemoteError::InvalidPublicKey("unsupported key type".to_string()));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || " +/=@.-_:".contains(c))
    {
        return Err(RemoteError::InvalidPublicKey(
            "public key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Script that installs `pubkey` as the only authorized key and restarts sshd.
///
/// # Errors
///
/// Returns an error if the key fails [`validate_pubkey`].
pub fn authorized_key_script(pubkey: &str) -> Result<String, RemoteError> {
    validate_pubkey(pubkey)?;
    let key = pubkey.trim();
    Ok([
        "mkdir -p $HOME/.ssh/".to_string(),
        format!("echo '{key}' > $HOME/.ssh/authorized_keys"),
        "chmod 700 $HOME/.ssh/".to_string(),
        "chmod 600 $HOME/.ssh/authorized_keys".to_string(),
        "service ssh restart".to_string(),
    ]
    .join(" && "))
}

/// Validate a Syncthing device id (`XXXXXXX-XXXXXXX-…`, base32 groups).
///
/// # Errors
///
/// Returns [`RemoteError::InvalidDeviceId`] if the id has the wrong shape.
pub fn validate_device_id(id: &str) -> Result<(), RemoteError> {
    let groups: Vec<&str> = id.trim().split('-').collect();
    let well_formed = groups.len() == 8
        && groups.iter().all(|g| {
            g.len() == 7
                && g.chars()
                    .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
        });
    if well_formed {
        Ok(())
    } else {
        Err(RemoteError::InvalidDeviceId(id.to_string()))
    }
}

/// Remote command that trusts the local Syncthing device.
///
/// # Errors
///
/// Returns an error if `local_device_id` is malformed.
pub fn remote_add_device_command(local_device_id: &str) -> Result<String, RemoteError> {
    validate_device_id(local_device_id)?;
    Ok(format!(
        "syncthing cli config devices add --device-id {} --name main --auto-accept-folders --compression always",
        local_device_id.trim()
    ))
}

/// Remote command printing the notebook's own Syncthing device id.
pub const REMOTE_DEVICE_ID_COMMAND: &str = "syncthing --device-id";

/// `vscode-remote://` URI opening `folder` on the notebook.
#[must_use]
pub fn editor_folder_uri(user: &str, endpoint: &TunnelEndpoint, folder: &str) -> String {
    format!(
        "vscode-remote://ssh-remote+{user}@{}:{}{folder}",
        endpoint.host, endpoint.port
    )
}
