//! dotenver CLI entry point
//!
//! Parses arguments, renders the selected templates and turns any error into
//! a user-friendly message with a non-zero exit status.

use anyhow::Result;
use clap::Parser;
use dotenver::cli;
use dotenver::core::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
