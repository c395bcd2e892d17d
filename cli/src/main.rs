//! kaggle-ssh - Kaggle notebooks as remote dev boxes over SSH

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;

use kaggle_ssh::cli::Cli;
use kaggle_ssh::logging::init_logging;
use kaggle_ssh::output::json::{error_code, format_error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    init_logging(cli.verbose);
    if let Err(e) = cli.run().await {
        match json.then(|| format_error(&format!("{e:#}"), error_code(&e))) {
            Some(Ok(body)) => println!("{body}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
