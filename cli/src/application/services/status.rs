//! Application service: notebook run-status polling.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{NotebookPage, StatusProbe};
use crate::domain::NotebookError;
use crate::domain::status::{INDICATOR_LABELS, RunStatus, indicator_target};

/// [`StatusProbe`] backed by the circle indicator of the notebook page.
pub struct IndicatorProbe<'a, P> {
    page: &'a P,
}

impl<'a, P: NotebookPage> IndicatorProbe<'a, P> {
    #[must_use]
    pub fn new(page: &'a P) -> Self {
        Self { page }
    }
}

impl<P: NotebookPage> StatusProbe for IndicatorProbe<'_, P> {
    async fn current_state(&self) -> Result<RunStatus> {
        for label in INDICATOR_LABELS {
            let indicator = indicator_target(label);
            if self.page.is_visible(&indicator).await? {
                let color = self.page.computed_color(&indicator).await?;
                tracing::debug!(label, color = %color, "status indicator");
                return Ok(RunStatus::from_indicator_color(&color)?);
            }
        }
        Err(NotebookError::IndicatorNotFound.into())
    }
}

/// Sample the status once per `interval` until it settles.
///
/// Returns `true` when the notebook is running and `false` when it is off.
///
/// # Errors
///
/// Returns [`NotebookError::StillLoading`] after `timeout_secs` samples
/// without a settled state, or any error of the probe itself.
pub async fn wait_until_settled(
    probe: &impl StatusProbe,
    timeout_secs: u64,
    interval: Duration,
) -> Result<bool> {
    for _ in 0..timeout_secs {
        match probe.current_state().await? {
            RunStatus::Running => return Ok(true),
            RunStatus::Off => return Ok(false),
            RunStatus::Loading => tokio::time::sleep(interval).await,
        }
    }
    Err(NotebookError::StillLoading(timeout_secs).into())
}
