mod assemble_cmd;
mod audit_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod nas_cmd;
mod relocate_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Assemble(args) => assemble_cmd::run(args),
        Command::Relocate(args) => relocate_cmd::run(args),
        Command::Audit(args) => audit_cmd::run(args),
        Command::Nas(args) => nas_cmd::run(args),
    }
}
