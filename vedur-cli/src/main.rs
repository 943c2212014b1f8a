//! Binary crate for the `vedur` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive location picker
//! - Printing the rendered forecast view

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
