use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    grid::{self, GridArgs},
    lhs::{self, LhsArgs},
    status::{self, StatusArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "scan", about = "Parameter scan campaign generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a regular grid of cases.
    Grid(GridArgs),
    /// Lay out a seeded Latin hypercube of cases.
    Lhs(LhsArgs),
    /// List the cases already present under a campaign root.
    Status(StatusArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Grid(args) => grid::run(&args),
        Command::Lhs(args) => lhs::run(&args),
        Command::Status(args) => status::run(&args),
    }
}
