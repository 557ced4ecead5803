//! Dino command implementation.
//!
//! Admissions go through [`AdmissionService`], so the species lookup,
//! slot reservation and occupant insert happen in one transaction.
//! Release does not consult the species reference at all.

use clap::{Args, Subcommand};
use dinocage::{
    release_occupant, AdmissionService, CageId, Category, Database, NewOccupant, OccupantFilter,
    OccupantId, OutputFormat,
};

use crate::error::CliError;
use crate::output::{print_rows, OccupantRow};
use crate::utils::{load_configuration, load_species, open_database, GlobalOptions};

/// Manage dinosaurs.
#[derive(Args)]
pub struct DinoCommand {
    #[command(subcommand)]
    pub action: DinoAction,
}

/// Dino subcommands.
#[derive(Subcommand)]
pub enum DinoAction {
    /// Admit a dinosaur, into a given cage or the first one with room
    Add(AddDino),

    /// List dinosaurs
    List(ListDinos),

    /// Release a dinosaur, freeing its slot
    Release(ReleaseDino),
}

/// Admit a dinosaur.
#[derive(Args)]
pub struct AddDino {
    /// Species name (must be in the species reference)
    #[arg(long)]
    pub species: String,

    /// Name of the dinosaur
    #[arg(long)]
    pub name: String,

    /// Target cage (default: first active cage with room, provisioning one if needed)
    #[arg(long, value_name = "ID")]
    pub cage: Option<i64>,
}

/// List dinosaurs.
#[derive(Args)]
pub struct ListDinos {
    /// Only this species
    #[arg(long)]
    pub species: Option<String>,

    /// Only this diet
    #[arg(long, value_enum, ignore_case = true)]
    pub diet: Option<Category>,

    /// Only dinosaurs in this cage
    #[arg(long, value_name = "ID")]
    pub cage: Option<i64>,

    /// Output format (default: configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Release a dinosaur.
#[derive(Args)]
pub struct ReleaseDino {
    /// Dinosaur id
    pub id: i64,
}

impl DinoCommand {
    /// Execute the dino command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            DinoAction::Add(cmd) => cmd.execute(global),
            DinoAction::List(cmd) => cmd.execute(global),
            DinoAction::Release(cmd) => cmd.execute(global),
        }
    }
}

impl AddDino {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let occupant = NewOccupant::new(&self.species, &self.name)?;

        let config = load_configuration(global)?;
        let species = load_species(global, &config)?;
        let mut db = open_database(global, &config)?;

        let mut admissions =
            AdmissionService::new(&mut db, &species).with_default_capacity(config.cage_capacity()?);
        let admitted = match self.cage {
            Some(id) => admissions.admit_to_cage(&occupant, CageId::new(id))?,
            None => admissions.admit_to_any_cage(&occupant)?,
        };

        println!("{}", admitted.id);
        if !global.quiet {
            eprintln!(
                "Admitted {} the {} to cage {}",
                admitted.name, admitted.species, admitted.cage
            );
        }
        Ok(())
    }
}

impl ListDinos {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let filter = OccupantFilter::default()
            .with_category(self.diet)
            .with_cage(self.cage.map(CageId::new))
            .with_species(self.species);
        let occupants = Database::list_occupants(db.connection(), &filter)?;

        let rows: Vec<OccupantRow> = occupants.iter().map(OccupantRow::from).collect();
        print_rows(&rows, self.format.unwrap_or_else(|| config.output_format()))
    }
}

impl ReleaseDino {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let released = release_occupant(&mut db, OccupantId::new(self.id))?;
        if !global.quiet {
            eprintln!("Released {} from cage {}", released.name, released.cage);
        }
        Ok(())
    }
}
