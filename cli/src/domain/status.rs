//! Notebook run status as shown by the circle indicator next to the session
//! controls.
//!
//! Pure mapping only. Reading the indicator from the page lives in
//! `crate::application::services::status`.

use serde::Serialize;

use crate::domain::error::NotebookError;
use crate::domain::ui::UiTarget;

/// `aria-label` values the indicator may carry, in the order they are probed.
pub const INDICATOR_LABELS: &[&str] = &["off (run a cell to start)", "Running", "Starting", "Loading"];

const COLOR_OFF: &str = "rgb(95, 99, 104)";
const COLOR_LOADING: &str = "rgb(214, 173, 27)";
const COLOR_RUNNING: &str = "rgb(25, 118, 49)";

/// Logical state of the hosted notebook session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Off,
    Loading,
    Running,
}

impl RunStatus {
    /// Map the computed CSS color of the indicator to a status.
    ///
    /// # Errors
    ///
    /// Returns [`NotebookError::UnknownIndicatorColor`] for any color other
    /// than the three the site uses.
    pub fn from_indicator_color(color: &str) -> Result<Self, NotebookError> {
        match color.trim() {
            COLOR_OFF => Ok(Self::Off),
            COLOR_LOADING => Ok(Self::Loading),
            COLOR_RUNNING => Ok(Self::Running),
            other => Err(NotebookError::UnknownIndicatorColor(other.to_string())),
        }
    }

    /// `true` for the states the poller stops on.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Off | Self::Running)
    }
}

/// CSS selector of the indicator span carrying `label`.
#[must_use]
pub fn indicator_selector(label: &str) -> String {
    format!("span[aria-label=\"{label}\"]")
}

/// The indicator span carrying `label`; the page may render it more than
/// once, so the first match is used.
#[must_use]
pub fn indicator_target(label: &str) -> UiTarget {
    UiTarget::css(&indicator_selector(label)).first()
}
