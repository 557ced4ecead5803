//! Species reference: the read-only mapping from species name to category.
//!
//! The catalog is loaded once at startup and never mutated afterwards, so
//! it can be shared by reference without locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cage::Category;
use crate::error::{Error, Result};

/// One entry of a species reference file.
///
/// The `diet` is kept as a string so that files with unsupported codes can
/// still be loaded; such entries are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    /// Species name.
    pub name: String,
    /// Diet code (`H` or `C`).
    pub diet: String,
}

/// File name of the species reference inside the data directory.
pub const SPECIES_FILE_NAME: &str = "species.json";

/// Species shipped with the library, used when no reference file exists.
const BUILTIN_SPECIES: &[(&str, Category)] = &[
    ("ankylosaurus", Category::Herbivore),
    ("brachiosaurus", Category::Herbivore),
    ("megalosaurus", Category::Carnivore),
    ("spinosaurus", Category::Carnivore),
    ("stegosaurus", Category::Herbivore),
    ("triceratops", Category::Herbivore),
    ("tyrannosaurus", Category::Carnivore),
    ("velociraptor", Category::Carnivore),
];

/// Immutable snapshot of the species reference.
///
/// # Examples
///
/// ```
/// use dinocage::{Category, SpeciesCatalog};
///
/// let catalog = SpeciesCatalog::builtin();
/// assert_eq!(catalog.category_for("Tyrannosaurus"), Some(Category::Carnivore));
/// assert_eq!(catalog.category_for("dodo"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesCatalog {
    entries: BTreeMap<String, Category>,
}

impl SpeciesCatalog {
    /// Returns the built-in species reference.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_SPECIES
            .iter()
            .map(|(name, category)| ((*name).to_string(), *category))
            .collect()
    }

    /// Builds a catalog from parsed file entries.
    ///
    /// Names are lower-cased. Entries whose diet is not a known category are
    /// skipped with a warning.
    #[must_use]
    pub fn from_entries(entries: &[SpeciesEntry]) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            match entry.diet.parse::<Category>() {
                Ok(category) => {
                    catalog
                        .entries
                        .insert(entry.name.trim().to_lowercase(), category);
                }
                Err(_) => {
                    log::warn!(
                        "skipping species '{}': unsupported diet '{}'",
                        entry.name,
                        entry.diet
                    );
                }
            }
        }
        catalog
    }

    /// Parses a JSON species reference (an array of `{"name", "diet"}`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpeciesReference`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<SpeciesEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(&entries))
    }

    /// Loads a JSON species reference file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpeciesFileNotFound`] if the file does not exist,
    /// [`Error::Io`] if it cannot be read, or [`Error::SpeciesReference`] if
    /// it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SpeciesFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        log::debug!(
            "loaded {} species from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Resolves the species reference to use.
    ///
    /// An explicitly configured file must exist. Otherwise
    /// `{data_dir}/species.json` is used when present, and the built-in
    /// reference when not.
    ///
    /// # Errors
    ///
    /// See [`SpeciesCatalog::load`].
    pub fn discover(explicit: Option<&Path>, data_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = data_dir.join(SPECIES_FILE_NAME);
        if default_path.exists() {
            return Self::load(&default_path);
        }

        log::debug!("no species file found, using the built-in reference");
        Ok(Self::builtin())
    }

    /// Returns the category of a species, matching the name case-insensitively.
    #[must_use]
    pub fn category_for(&self, name: &str) -> Option<Category> {
        self.entries.get(&name.trim().to_lowercase()).copied()
    }

    /// Iterates over `(name, category)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), *c))
    }

    /// Returns the number of known species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no species are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Category)> for SpeciesCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Category)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, category)| (name.trim().to_lowercase(), category))
                .collect(),
        }
    }
}
