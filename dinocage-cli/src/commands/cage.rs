//! Cage command implementation.
//!
//! `cage add`, `cage list`, `cage status` and `cage dinosaurs`.

use clap::{Args, Subcommand};
use dinocage::{
    provision_cage, set_cage_status, CageId, CageStatus, Capacity, Category, Database, Error,
    OccupantFilter, OutputFormat,
};

use crate::error::CliError;
use crate::output::{print_rows, CageRow, OccupantRow};
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Manage cages.
#[derive(Args)]
pub struct CageCommand {
    #[command(subcommand)]
    pub action: CageAction,
}

/// Cage subcommands.
#[derive(Subcommand)]
pub enum CageAction {
    /// Provision a new, empty, active cage
    Add(AddCage),

    /// List cages
    List(ListCages),

    /// Power a cage up or down
    Status(SetStatus),

    /// List the dinosaurs held in a cage
    Dinosaurs(CageDinosaurs),
}

/// Provision a new cage.
#[derive(Args)]
pub struct AddCage {
    /// Diet the cage is provisioned for (H or C)
    #[arg(long, value_enum, ignore_case = true)]
    pub diet: Category,

    /// Maximum number of occupants (default: configured capacity)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub capacity: Option<i64>,
}

/// List cages.
#[derive(Args)]
pub struct ListCages {
    /// Only cages with this status (ACTIVE or DOWN)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Only cages for this diet
    #[arg(long, value_enum, ignore_case = true)]
    pub diet: Option<Category>,

    /// Output format (default: configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Change a cage's power status.
#[derive(Args)]
pub struct SetStatus {
    /// Cage id
    pub id: i64,

    /// New status (ACTIVE or DOWN)
    pub status: String,
}

/// List the dinosaurs in one cage.
#[derive(Args)]
pub struct CageDinosaurs {
    /// Cage id
    pub id: i64,

    /// Output format (default: configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl CageCommand {
    /// Execute the cage command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            CageAction::Add(cmd) => cmd.execute(global),
            CageAction::List(cmd) => cmd.execute(global),
            CageAction::Status(cmd) => cmd.execute(global),
            CageAction::Dinosaurs(cmd) => cmd.execute(global),
        }
    }
}

impl AddCage {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let capacity = match self.capacity {
            Some(n) => Capacity::try_from(n)?,
            None => config.cage_capacity()?,
        };

        let mut db = open_database(global, &config)?;
        let cage = provision_cage(&mut db, capacity, self.diet)?;

        println!("{}", cage.id);
        if !global.quiet {
            eprintln!(
                "Provisioned {} cage {} with capacity {}",
                cage.category, cage.id, cage.capacity
            );
        }
        Ok(())
    }
}

impl ListCages {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<CageStatus>)
            .transpose()?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let cages = Database::list_cages(db.connection(), status, self.diet)?;
        let rows: Vec<CageRow> = cages.iter().map(CageRow::from).collect();
        print_rows(&rows, self.format.unwrap_or_else(|| config.output_format()))
    }
}

impl SetStatus {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let status: CageStatus = self.status.parse()?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let cage = set_cage_status(&mut db, CageId::new(self.id), status)?;
        if !global.quiet {
            eprintln!("Cage {} is {}", cage.id, cage.status);
        }
        Ok(())
    }
}

impl CageDinosaurs {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let cage = CageId::new(self.id);

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if Database::get_cage(db.connection(), cage)?.is_none() {
            return Err(Error::CageNotFound { cage }.into());
        }

        let filter = OccupantFilter::default().with_cage(Some(cage));
        let occupants = Database::list_occupants(db.connection(), &filter)?;
        let rows: Vec<OccupantRow> = occupants.iter().map(OccupantRow::from).collect();
        print_rows(&rows, self.format.unwrap_or_else(|| config.output_format()))
    }
}
