mod cli;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    tracing::debug!("Using {:?}", config);

    match cli.command {
        Commands::Compare { first, second, json } => {
            cli::compare::run(&config, &first, &second, json)
        }
        Commands::Tokens { file } => cli::tokens::run(&config, &file),
        Commands::Check => cli::check::run(&config),
    }
}
