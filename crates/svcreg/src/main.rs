//! svcreg - Entry Point
//!
//! Loads configuration, initializes logging and runs the requested command.

// Force-link svcreg-providers to ensure linkme registrations are included
extern crate svcreg_providers;

use clap::Parser;
use svcreg::cli::{Cli, run};
use svcreg_infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let output = run(cli.command(), &config).await?;
    print!("{output}");
    Ok(())
}
