//! Main entry point for the dinocage CLI.
//!
//! This is the command-line interface for the dinocage cage allocator.
//! It provides commands for managing cages and their occupants:
//! - `cage`: Provision, list and power cages
//! - `dino`: Admit, list and release dinosaurs
//! - `species`: Show the species reference
//! - `verify`: Check database integrity and occupancy counters

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = dinocage::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        species_file: cli.species_file,
    };

    let result = match cli.command {
        cli::Command::Cage(cmd) => cmd.execute(&global),
        cli::Command::Dino(cmd) => cmd.execute(&global),
        cli::Command::Species(cmd) => cmd.execute(&global),
        cli::Command::Verify(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
