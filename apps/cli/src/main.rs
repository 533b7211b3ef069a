use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vardiff_cli::cli::{Cli, Commands};
use vardiff_cli::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Difference(args) => {
            let command_line = std::env::args().collect::<Vec<_>>().join(" ");
            commands::difference::run(&args.to_config(), &command_line)?;
        }
        Commands::Dictionary { path } => {
            println!("{}", commands::dictionary::run(path)?);
        }
    }
    Ok(())
}
