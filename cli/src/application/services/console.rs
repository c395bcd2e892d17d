//! Application service: typing commands into the notebook console.

use anyhow::Result;

use crate::application::ports::NotebookPage;
use crate::domain::UiTarget;

const CONSOLE_INPUT: &str = "Enter console command here";
const OPEN_CONSOLE: &str = "Open console";
const CLEAR_BUTTON: &str = "Clear";

/// Submit `command` to the notebook console, opening it first if needed.
///
/// The command is not awaited; its output, if any, lands in the page text.
/// With `clear` the console log is wiped after submitting.
///
/// # Errors
///
/// Returns an error if any console control cannot be used.
pub async fn run_in_console(page: &impl NotebookPage, command: &str, clear: bool) -> Result<()> {
    let input = UiTarget::placeholder(CONSOLE_INPUT);
    if !page.is_visible(&input).await? {
        page.click(&UiTarget::label(OPEN_CONSOLE)).await?;
    }
    page.fill(&input, command).await?;
    page.press(&input, "Enter").await?;
    tracing::info!(bytes = command.len(), "submitted console command");
    if clear {
        page.click(&UiTarget::button(CLEAR_BUTTON)).await?;
        tracing::info!("cleared console log");
    }
    Ok(())
}
