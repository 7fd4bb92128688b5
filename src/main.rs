//! `hrm`: command-line front end for the in-memory HR directory.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
