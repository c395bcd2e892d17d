//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::infra::config::YamlTunablesStore;

/// Turn a Kaggle notebook into a remote dev box reachable over SSH
#[derive(Parser)]
#[command(name = "kaggle-ssh", version)]
pub struct Cli {
    /// Menu choice: 1 CPU only, 2 single GPU, 3 double GPU, 4 TPU, 5 close
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub choice: Option<u8>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Output the run result in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip the menu and use the default choice (close)
    #[arg(short, long)]
    pub yes: bool,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Execute the run.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is incomplete or any step fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            choice,
            headed,
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
        } = self;
        let tunables = YamlTunablesStore.load()?;
        let app = AppContext::new(
            &AppFlags {
                output: OutputFlags {
                    no_color,
                    quiet,
                    json,
                },
                behaviour: BehaviourFlags { yes, headed },
            },
            tunables,
        );
        let intent = commands::menu::resolve_intent(&app, choice)?;
        commands::session::run(&app, intent).await
    }
}
