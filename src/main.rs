//! vellum CLI entry point
//!
//! Parses command-line arguments, runs the selected command and reports errors
//! with context and suggestions.
//!
//! - `render` - Render a template or partial with JSON data
//! - `lookup` - Print the file a template name resolves to

use anyhow::Result;
use clap::Parser;
use vellum::cli;
use vellum::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
