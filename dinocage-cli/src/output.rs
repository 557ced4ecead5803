//! Listing output in table, JSON and CSV form.

use std::io::Write;

use dinocage::{Cage, Category, Occupant, OutputFormat};
use serde::Serialize;

use crate::error::CliError;
use crate::utils::format_timestamp;

/// A record that can be printed as a listing row.
pub trait Row: Serialize {
    /// Column names, lowercase.
    const HEADERS: &'static [&'static str];

    /// Field values in column order.
    fn fields(&self) -> Vec<String>;
}

/// One line of `cage list`.
#[derive(Serialize)]
pub struct CageRow {
    id: i64,
    status: &'static str,
    diet: &'static str,
    capacity: u32,
    occupancy: u32,
}

impl From<&Cage> for CageRow {
    fn from(cage: &Cage) -> Self {
        Self {
            id: cage.id.value(),
            status: cage.status.as_str(),
            diet: cage.category.code(),
            capacity: cage.capacity.value(),
            occupancy: cage.occupancy,
        }
    }
}

impl Row for CageRow {
    const HEADERS: &'static [&'static str] = &["id", "status", "diet", "capacity", "occupancy"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.to_string(),
            self.diet.to_string(),
            self.capacity.to_string(),
            self.occupancy.to_string(),
        ]
    }
}

/// One line of `dino list` or `cage dinosaurs`.
#[derive(Serialize)]
pub struct OccupantRow {
    id: i64,
    name: String,
    species: String,
    diet: &'static str,
    cage: i64,
    admitted_at: String,
}

impl From<&Occupant> for OccupantRow {
    fn from(occupant: &Occupant) -> Self {
        Self {
            id: occupant.id.value(),
            name: occupant.name.clone(),
            species: occupant.species.clone(),
            diet: occupant.category.code(),
            cage: occupant.cage.value(),
            admitted_at: format_timestamp(occupant.admitted_at),
        }
    }
}

impl Row for OccupantRow {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "species", "diet", "cage", "admitted_at"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.species.clone(),
            self.diet.to_string(),
            self.cage.to_string(),
            self.admitted_at.clone(),
        ]
    }
}

/// One line of `species list`.
#[derive(Serialize)]
pub struct SpeciesRow {
    name: String,
    diet: &'static str,
}

impl SpeciesRow {
    /// Creates a row for a catalog entry.
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            diet: category.code(),
        }
    }
}

impl Row for SpeciesRow {
    const HEADERS: &'static [&'static str] = &["name", "diet"];

    fn fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.diet.to_string()]
    }
}

/// Writes `rows` to stdout in `format`.
pub fn print_rows<T: Row>(rows: &[T], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    match format {
        OutputFormat::Table => write_table(handle, rows),
        OutputFormat::Json => write_json(handle, rows),
        OutputFormat::Csv => write_csv(handle, rows),
    }
}

fn write_table<T: Row>(mut out: impl Write, rows: &[T]) -> Result<(), CliError> {
    let header_line = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for row in rows {
        writeln!(out, "{}", row.fields().join("\t"))?;
    }
    Ok(())
}

/// Writes any serializable value as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(mut out: impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(out)?;
    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn write_csv<T: Row>(out: impl Write, rows: &[T]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(T::HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row.fields()).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}
