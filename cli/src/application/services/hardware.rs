//! Application service: accelerator selection in the session options panel.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{NotebookPage, ProgressReporter};
use crate::domain::{Accelerator, NotebookError, UiTarget};

const SESSION_OPTIONS: &str = "Session optionskeyboard_arrow_down";
const QUOTA_PATTERN: &str = "[1-9][0-9] hrs";
const RUN_CURRENT_CELL: &str = "Run current cell";

/// Accelerator before and after [`select_hardware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareChange {
    pub previous: Accelerator,
    pub selected: Accelerator,
}

/// Switch the notebook to `wanted` and run the current cell so the session
/// starts.
///
/// # Errors
///
/// Returns [`NotebookError::HardwareNotUnique`] unless exactly one
/// accelerator label is visible, or any UI error from the page.
pub async fn select_hardware(
    page: &impl NotebookPage,
    wanted: Accelerator,
    reporter: &impl ProgressReporter,
) -> Result<HardwareChange> {
    let options = UiTarget::text(SESSION_OPTIONS);
    if page.is_visible(&options).await? {
        page.click(&options).await?;
    }

    let mut visible = Vec::new();
    for accel in Accelerator::ALL {
        if page.is_visible(&UiTarget::text(accel.label())).await? {
            tracing::info!("{} currently selected as accelerator", accel.describe());
            visible.push(accel);
        }
    }
    let &[current] = visible.as_slice() else {
        return Err(NotebookError::HardwareNotUnique {
            visible: visible.len(),
        }
        .into());
    };

    // The option's text may carry a quota line below the label.
    let shown = page
        .inner_text(&UiTarget::text(current.label()))
        .await
        .context("reading current accelerator")?;
    let shown = shown.lines().next().unwrap_or(current.label()).to_string();
    let previous = Accelerator::from_label(&shown).unwrap_or(current);

    page.click(&UiTarget::exact_text(&shown)).await?;
    page.click(&UiTarget::exact_label(wanted.label())).await?;

    if wanted.is_metered() {
        let quota = page
            .text_contents(&UiTarget::TextPattern(QUOTA_PATTERN.to_string()))
            .await?;
        if !quota.is_empty() {
            reporter.info(&format!("Quota remaining: {}", quota.join(", ")));
        }
    }
    if wanted != previous && wanted != Accelerator::None {
        page.click(&UiTarget::button(&format!("Turn on {}", wanted.label())))
            .await?;
    }
    page.click(&UiTarget::label(RUN_CURRENT_CELL)).await?;

    tracing::info!(%wanted, %previous, "executed warm-up cell");
    Ok(HardwareChange {
        previous,
        selected: wanted,
    })
}
