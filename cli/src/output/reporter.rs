//! `TerminalReporter`: the `ProgressReporter` handed to application services.
//!
//! Every event goes to the tracing log as well as to the terminal, so `-v`
//! output keeps the same milestones when `--quiet` hides them.

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        tracing::info!("{message}");
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
        self.ctx.warn(message);
    }

    fn info(&self, message: &str) {
        self.ctx.info(message);
    }
}
