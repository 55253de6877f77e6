//! wirebox - Entry Point
//!
//! Binary entry point. Lives in the `wirebox` facade crate next to the
//! library so the CLI logic in [`wirebox::cli`] stays testable.

use clap::Parser;
use wirebox::cli::{Cli, execute};
use wirebox::infrastructure::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let output = execute(&cli.command, &config)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
