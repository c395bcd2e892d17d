//! The numbered start/close menu.

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::Intent;
use crate::domain::hardware::{DEFAULT_CHOICE, MENU_ENTRIES};
use crate::output::human::HumanRenderer;

/// Turn `--choice`, or the user's answer to the menu, into an intent.
///
/// Without `--choice`, non-interactive runs take [`DEFAULT_CHOICE`].
///
/// # Errors
///
/// Returns an error if the prompt fails or the number is out of range.
pub fn resolve_intent(app: &AppContext, choice: Option<u8>) -> Result<Intent> {
    let choice = match choice {
        Some(n) => n,
        None if app.non_interactive => DEFAULT_CHOICE,
        None => {
            HumanRenderer::new(&app.output).render_menu(MENU_ENTRIES);
            let max = u8::try_from(MENU_ENTRIES.len()).unwrap_or(u8::MAX);
            app.choose("Choice", max, DEFAULT_CHOICE)?
        }
    };
    let intent = Intent::from_choice(choice)?;
    tracing::info!(choice, ?intent, "menu choice");
    Ok(intent)
}
