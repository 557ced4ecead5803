//! Verify command implementation.
//!
//! Runs the SQLite integrity check and the occupancy audit. Any finding
//! makes the command fail with exit code 1.

use clap::Args;
use dinocage::{verify_database, OccupancyViolation, OutputFormat, VerifyReport};

use crate::error::CliError;
use crate::output::write_json;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Verify the database.
#[derive(Args)]
pub struct VerifyCommand {
    /// Output format; only `json` changes the report layout
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl VerifyCommand {
    /// Execute the verify command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let report = verify_database(&db)?;

        match self.format.unwrap_or_else(|| config.output_format()) {
            OutputFormat::Json => write_json(std::io::stdout().lock(), &report)?,
            OutputFormat::Table | OutputFormat::Csv => print_report(&report),
        }

        if report.is_clean() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "verification failed: {} problem(s) found",
                report.integrity.len() + report.violations.len()
            )))
        }
    }
}

fn print_report(report: &VerifyReport) {
    if report.is_clean() {
        println!("ok");
        return;
    }
    for problem in &report.integrity {
        println!("integrity: {problem}");
    }
    for violation in &report.violations {
        println!("{}", describe(violation));
    }
}

fn describe(violation: &OccupancyViolation) -> String {
    match violation {
        OccupancyViolation::CountMismatch {
            cage,
            recorded,
            actual,
        } => format!("cage {cage}: occupancy recorded as {recorded} but holds {actual}"),
        OccupancyViolation::OverCapacity {
            cage,
            capacity,
            actual,
        } => format!("cage {cage}: holds {actual} with capacity {capacity}"),
        OccupancyViolation::OccupiedWhileDown { cage, actual } => {
            format!("cage {cage}: DOWN but holds {actual}")
        }
        OccupancyViolation::CategoryMismatch {
            occupant,
            cage,
            occupant_category,
            cage_category,
        } => format!(
            "dinosaur {occupant}: {occupant_category} in {cage_category} cage {cage}"
        ),
    }
}
