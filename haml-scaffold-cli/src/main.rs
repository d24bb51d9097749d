//! haml-scaffold CLI tool

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use haml_scaffold::observability;
use haml_scaffold_cli_lib::{Cli, ScaffoldCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose).context("Failed to initialize logging")?;

    ScaffoldCommand::from_cli(&cli)?.execute()
}
