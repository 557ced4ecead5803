//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CageCommand, DinoCommand, SpeciesCommand, VerifyCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing cages and the dinosaurs in them.
#[derive(Parser)]
#[command(name = "dinocage")]
#[command(version, about = "Manage cages and their occupants", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "DINOCAGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the maximum lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "DINOCAGE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Species reference file (JSON)
    #[arg(long, value_name = "PATH", global = true)]
    pub species_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Provision, list and power cages
    Cage(CageCommand),

    /// Admit, list and release dinosaurs
    Dino(DinoCommand),

    /// Show the species reference
    Species(SpeciesCommand),

    /// Check database integrity and occupancy counters
    Verify(VerifyCommand),
}
