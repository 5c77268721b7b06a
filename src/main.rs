mod cli;
mod client;
mod config;
mod error;
mod forecast;
mod pipeline;
mod registry;
mod store;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Rank(args) => match command::rank(args).await {
            Ok(filename) => println!("Ranking saved to `{}`", filename),
            Err(e) => {
                tracing::error!("Run aborted: {:#}", e);
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
        Commands::Cities { cities } => command::cities(cities.as_ref())?,
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cityrank={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
