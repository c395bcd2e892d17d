//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::session::{SessionOutcome, ShutdownOutcome};
use crate::output::OutputContext;

/// Renders run results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the numbered menu to stderr, next to the prompt that follows.
    /// Shown even when quiet.
    pub fn render_menu(&self, entries: &[(u8, &str)]) {
        eprintln!();
        eprintln!("  {}", "Kaggle ssh".style(self.ctx.styles.header));
        eprintln!();
        for (number, text) in entries {
            eprintln!("  {} {text}", number.style(self.ctx.styles.accent));
        }
        eprintln!();
    }

    /// Render the summary of a started session.
    pub fn render_session(&self, outcome: &SessionOutcome) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Session ready");
        self.ctx.kv("endpoint  ", &outcome.endpoint.to_string());
        self.ctx.kv("hardware  ", outcome.hardware.label());
        self.ctx.kv("previous  ", outcome.previous_hardware.label());
        self.ctx.kv(
            "editor    ",
            if outcome.editor_opened {
                "opened"
            } else {
                "not opened"
            },
        );
        if let Some(id) = &outcome.remote_sync_id {
            self.ctx.kv("syncthing ", id);
        }
    }

    /// Render the result of a shutdown request.
    pub fn render_shutdown(&self, outcome: ShutdownOutcome) {
        match outcome {
            ShutdownOutcome::AlreadyOff | ShutdownOutcome::TurnedOff => {}
            ShutdownOutcome::StillRunning => {
                self.ctx.warn("The session may still be running; check the notebook page.");
            }
        }
    }
}
