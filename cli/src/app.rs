//! Application context: unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` from the top-level flags and the
//! settings file.

use anyhow::Result;

use crate::domain::Tunables;
use crate::infra::config::ProcessEnv;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `KAGGLE_SSH_YES` env vars).
    pub yes: bool,
    /// Show the browser window regardless of `browser.headless`.
    pub headed: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings file values.
    pub tunables: Tunables,
    /// Process environment with `.env` loaded.
    pub env: ProcessEnv,
    /// Run Chromium without a window.
    pub headless: bool,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or
    /// `KAGGLE_SSH_YES` environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags, tunables: Tunables) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("KAGGLE_SSH_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // JSON on stdout must not be interleaved with progress lines.
        let quiet = flags.output.quiet || flags.output.json;
        let headless = tunables.browser.headless && !flags.behaviour.headed;

        Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            tunables,
            env: ProcessEnv::load(),
            headless,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Create a `TerminalReporter` for use with application services.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Ask the user for a number in `1..=max`.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or
    /// `KAGGLE_SSH_YES` env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn choose(&self, prompt: &str, max: u8, default: u8) -> Result<u8> {
        if self.non_interactive {
            return Ok(default);
        }
        let choice = dialoguer::Input::<u8>::new()
            .with_prompt(prompt)
            .default(default)
            .validate_with(|n: &u8| {
                if (1..=max).contains(n) {
                    Ok(())
                } else {
                    Err(format!("choose a number from 1 to {max}"))
                }
            })
            .interact_text()?;
        Ok(choice)
    }
}
