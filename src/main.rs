//! codecollate - Render a directory tree and collate source files
//!
//! codecollate provides:
//! - An ASCII tree diagram of a directory, with fixed exclusions
//! - A single merged document: the tree, then every allow-listed source file

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
