//! Syncthing `config.xml` editing and CLI argument building.
//!
//! Pure transformations over the configuration text; reading and writing the
//! file happens in `crate::application::services::local`.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::domain::error::SyncError;

/// Result of [`clear_devices_named`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearedConfig {
    /// The rewritten document.
    pub xml: String,
    /// Number of `<device>` entries that were cleared.
    pub cleared: usize,
}

/// Clear every top-level `<device name="…">` entry carrying `name`.
///
/// Matching elements keep their position but lose all attributes and
/// children; other devices are left as they are.
///
/// # Errors
///
/// Returns [`SyncError::MalformedConfig`] if the document cannot be parsed
/// or re-serialized.
pub fn clear_devices_named(xml: &str, name: &str) -> Result<ClearedConfig, SyncError> {
    let mut root =
        Element::parse(xml.as_bytes()).map_err(|e| SyncError::MalformedConfig(e.to_string()))?;

    let mut cleared = 0;
    for node in &mut root.children {
        if let XMLNode::Element(device) = node
            && device.name == "device"
            && device.attributes.get("name").map(String::as_str) == Some(name)
        {
            device.attributes.clear();
            device.children.clear();
            cleared += 1;
        }
    }

    let mut out = Vec::new();
    root.write_with_config(&mut out, EmitterConfig::new().perform_indent(true))
        .map_err(|e| SyncError::MalformedConfig(e.to_string()))?;
    let xml = String::from_utf8(out).map_err(|e| SyncError::MalformedConfig(e.to_string()))?;
    Ok(ClearedConfig { xml, cleared })
}

/// Arguments for `syncthing` that register the notebook as a peer.
#[must_use]
pub fn add_device_args(remote_device_id: &str, name: &str) -> Vec<String> {
    [
        "cli",
        "config",
        "devices",
        "add",
        "--device-id",
        remote_device_id,
        "--name",
        name,
        "--compression",
        "always",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Arguments for `syncthing` that share `folder_id` with the notebook.
#[must_use]
pub fn share_folder_args(folder_id: &str, remote_device_id: &str) -> Vec<String> {
    [
        "cli",
        "config",
        "folders",
        folder_id,
        "devices",
        "add",
        "--device-id",
        remote_device_id,
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}
