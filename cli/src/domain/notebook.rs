//! Jupyter notebook (`.ipynb`) content extraction and template rendering.
//!
//! Cell metadata, outputs and kernel language are ignored, so any scripting
//! language in the code cells comes through untouched.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Placeholder replaced with the generated root password.
pub const PASSWORD_PLACEHOLDER: &str = "__kaggle_password_placeholder__";
/// Placeholder replaced with the ngrok auth token.
pub const NGROK_TOKEN_PLACEHOLDER: &str = "__ngrok_token_placeholder__";

#[derive(Debug, Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: Source,
}

/// nbformat allows a cell's source as one string or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Source {
    Lines(Vec<String>),
    Text(String),
}

impl Default for Source {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl Source {
    fn lines(&self) -> Vec<&str> {
        match self {
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
            Self::Text(text) => text.lines().collect(),
        }
    }
}

/// Code and narrative text of a notebook, each flattened in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookContent {
    pub code: String,
    pub markdown: String,
}

impl NotebookContent {
    /// Parse an `.ipynb` JSON document.
    ///
    /// Every source line is right-trimmed and terminated with `\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid notebook JSON.
    pub fn from_ipynb(json: &str) -> Result<Self> {
        let notebook: Notebook = serde_json::from_str(json).context("parsing notebook JSON")?;
        let mut content = Self::default();
        for cell in &notebook.cells {
            let target = match cell.cell_type.as_str() {
                "code" => &mut content.code,
                "markdown" => &mut content.markdown,
                _ => continue,
            };
            for line in cell.source.lines() {
                target.push_str(line.trim_end());
                target.push('\n');
            }
        }
        Ok(content)
    }
}

/// Inject the one-time password and the ngrok token into the tunnel script.
#[must_use]
pub fn render_tunnel_script(code: &str, password: &str, ngrok_token: &str) -> String {
    code.replace(PASSWORD_PLACEHOLDER, password)
        .replace(NGROK_TOKEN_PLACEHOLDER, ngrok_token)
}
