use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-build the driver crates for the embedded target
    Build {
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,
    },
    /// Run the host test suites of the driver crates
    Test {
        /// Only test this crate
        #[arg(long, short)]
        package: Option<String>,
    },
}
