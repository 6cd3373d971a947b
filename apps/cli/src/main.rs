//! sheetsite CLI: spreadsheet-driven content for the campaign site.
//!
//! Fetches each section's published CSV export, maps it onto typed content
//! (falling back to built-in tables), and submits citizen feedback.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
