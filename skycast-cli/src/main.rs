//! Binary crate for the `skycast` terminal weather lookup.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive search session (debounced autocomplete)
//! - Rendering the themed weather card

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod interactive;
mod render;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
