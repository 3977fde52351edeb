use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::HintLevel;

/// One round's secret word with three hints, vaguest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretEntry {
    pub solution: String,
    pub hints: [String; 3],
}

impl SecretEntry {
    pub fn new(solution: impl Into<String>, hints: [&str; 3]) -> Self {
        Self {
            solution: solution.into(),
            hints: hints.map(String::from),
        }
    }

    pub fn hint(&self, level: HintLevel) -> &str {
        &self.hints[level.index()]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("the secret catalog is empty")]
    Empty,
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Non-empty, read-only list of secrets to draw from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretCatalog {
    entries: Vec<SecretEntry>,
}

static BUILTIN: Lazy<Vec<SecretEntry>> = Lazy::new(|| {
    vec![
        SecretEntry::new("Cheesecake", ["Dessert", "Sweet with cheese", "Food"]),
        SecretEntry::new("Lighthouse", ["Coast", "Tower with a lamp", "Building"]),
        SecretEntry::new("Penguin", ["Ice", "Bird that cannot fly", "Animal"]),
        SecretEntry::new("Violin", ["Orchestra", "Played with a bow", "Instrument"]),
        SecretEntry::new("Volcano", ["Island", "Mountain that erupts", "Landscape"]),
        SecretEntry::new("Astronaut", ["Rocket", "Works in space", "Job"]),
        SecretEntry::new("Umbrella", ["Rain", "Folds open over your head", "Object"]),
        SecretEntry::new("Chess", ["Board", "Checkmate", "Game"]),
    ]
});

impl SecretCatalog {
    pub fn new(entries: Vec<SecretEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    /// Small catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.clone(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<SecretEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[SecretEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly picks one entry.
    pub fn choose(&self, rng: &mut impl Rng) -> &SecretEntry {
        // Non-empty by construction.
        &self.entries[rng.gen_range(0..self.entries.len())]
    }
}
