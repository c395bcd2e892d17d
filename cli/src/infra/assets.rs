//! Embedded assets: the two scripts compiled into the CLI binary.
//!
//! At compile time, `include_dir!` embeds everything under `cli/assets/`:
//!   - `open_ngrok_ssh_kaggle.ipynb`: code cells typed into the notebook
//!     console to start sshd and the ngrok tunnel
//!   - `install_command.sh`: run over SSH once the tunnel is up
//!
//! A directory configured as `paths.assets_dir` takes precedence.

use std::path::Path;

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

pub const TUNNEL_NOTEBOOK: &str = "open_ngrok_ssh_kaggle.ipynb";
pub const INSTALL_SCRIPT: &str = "install_command.sh";

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Return the raw bytes of a single embedded asset.
///
/// # Errors
///
/// Returns an error if no asset with the given `name` exists.
pub fn get_asset(name: &str) -> Result<&'static [u8]> {
    EMBEDDED_ASSETS
        .get_file(name)
        .map(|f| f.contents())
        .ok_or_else(|| anyhow::anyhow!("embedded asset not found: {name}"))
}

/// Load `name` as text from `override_dir` when given, else from the
/// embedded copy.
///
/// # Errors
///
/// Returns an error if the file is missing or not UTF-8.
pub fn load_asset(name: &str, override_dir: Option<&Path>) -> Result<String> {
    if let Some(dir) = override_dir {
        let path = dir.join(name);
        return std::fs::read_to_string(&path)
            .with_context(|| format!("reading asset {}", path.display()));
    }
    let bytes = get_asset(name)?;
    String::from_utf8(bytes.to_vec()).with_context(|| format!("embedded asset {name} is not UTF-8"))
}
