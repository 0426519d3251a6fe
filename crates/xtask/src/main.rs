mod build;
mod cli;
mod constants;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build { features, release } => {
            println!("Building drivers for {}...", constants::TARGET);
            build::build_all_drivers(features.as_deref(), *release)?;
            println!("Build complete!");
        }
        Commands::Test { package } => {
            test::run_tests(package.as_deref())?;
            println!("All tests passed!");
        }
    }

    Ok(())
}
