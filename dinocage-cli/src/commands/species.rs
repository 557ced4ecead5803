//! Species command implementation.

use clap::{Args, Subcommand};
use dinocage::OutputFormat;

use crate::error::CliError;
use crate::output::{print_rows, SpeciesRow};
use crate::utils::{load_configuration, load_species, GlobalOptions};

/// Inspect the species reference.
#[derive(Args)]
pub struct SpeciesCommand {
    #[command(subcommand)]
    pub action: SpeciesAction,
}

/// Species subcommands.
#[derive(Subcommand)]
pub enum SpeciesAction {
    /// List known species and their diet
    List {
        /// Output format (default: configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

impl SpeciesCommand {
    /// Execute the species command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let SpeciesAction::List { format } = self.action;

        let config = load_configuration(global)?;
        let species = load_species(global, &config)?;

        let rows: Vec<SpeciesRow> = species
            .iter()
            .map(|(name, category)| SpeciesRow::new(name, category))
            .collect();
        print_rows(&rows, format.unwrap_or_else(|| config.output_format()))
    }
}
