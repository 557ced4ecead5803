//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `cage`: Provision, list and power cages
//! - `dino`: Admit, list and release dinosaurs
//! - `species`: Show the species reference
//! - `verify`: Check database integrity and occupancy counters

pub mod cage;
pub mod dino;
pub mod species;
pub mod verify;

pub use cage::CageCommand;
pub use dino::DinoCommand;
pub use species::SpeciesCommand;
pub use verify::VerifyCommand;
