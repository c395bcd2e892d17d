//! Terminal presentation: styles, the progress reporter, spinners and the
//! human and JSON renderers.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use styles::Styles;

/// Styling and terminal state shared by every printer.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Suppress everything but errors. Set by `--quiet` and by `--json`.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a TTY, without `--no-color` and `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if !no_color && is_tty && std::env::var("NO_COLOR").is_err() {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn line(&self, glyph: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }

    /// `→ msg`, a step that is starting.
    pub fn step(&self, msg: &str) {
        self.line("→", self.styles.header, msg);
    }

    /// `✓ msg`
    pub fn success(&self, msg: &str) {
        self.line("✓", self.styles.success, msg);
    }

    /// `! msg`
    pub fn warn(&self, msg: &str) {
        self.line("!", self.styles.warning, msg);
    }

    /// `ℹ msg`
    pub fn info(&self, msg: &str) {
        self.line("ℹ", self.styles.info, msg);
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Key in the dim style, then the value.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
