//! Scenario catalog: immutable level definitions, built-in and TOML-authored.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{AtomId, AtomState, CompletionTransform, ScenarioId, TransferRequirement},
    error::RedoxError,
};
use thiserror::Error;
use tracing::info;

mod builtin;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read scenario file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed scenario document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("scenario '{0}' is declared more than once")]
    DuplicateScenario(ScenarioId),
    #[error("scenario '{scenario}': {problem}")]
    Invalid {
        scenario: ScenarioId,
        problem: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub level: u32,
    pub title: String,
    pub description: String,
    pub equation: String,
    pub explanation_prompt: String,
    pub atoms: Vec<AtomState>,
    pub transfers: Vec<TransferRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionTransform>,
}

impl Scenario {
    pub fn atom(&self, id: &AtomId) -> Option<&AtomState> {
        self.atoms.iter().find(|atom| &atom.id == id)
    }

    /// First sentence of the description, as shown on the menu card.
    pub fn summary(&self) -> &str {
        self.description
            .split('。')
            .next()
            .unwrap_or(&self.description)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |problem: String| CatalogError::Invalid {
            scenario: self.id.clone(),
            problem,
        };

        let mut seen = HashSet::new();
        for atom in &self.atoms {
            if !seen.insert(&atom.id) {
                return Err(invalid(format!("atom '{}' is declared more than once", atom.id)));
            }
            if atom.max_valence == 0 {
                return Err(invalid(format!("atom '{}' has max_valence 0", atom.id)));
            }
            if !(0.0..=1.0).contains(&atom.opacity) {
                return Err(invalid(format!(
                    "atom '{}' opacity {} is outside [0, 1]",
                    atom.id, atom.opacity
                )));
            }
            if atom.scale <= 0.0 {
                return Err(invalid(format!("atom '{}' scale must be positive", atom.id)));
            }
        }

        let mut pairs = HashSet::new();
        for transfer in &self.transfers {
            if !pairs.insert(transfer.key()) {
                return Err(invalid(format!(
                    "transfer {} is declared more than once",
                    transfer.key()
                )));
            }
            if transfer.count == 0 {
                return Err(invalid(format!("transfer {} has count 0", transfer.key())));
            }
            for end in [&transfer.from_atom_id, &transfer.to_atom_id] {
                if self.atom(end).is_none() {
                    return Err(invalid(format!(
                        "transfer {} names unknown atom '{end}'",
                        transfer.key()
                    )));
                }
            }
        }

        for atom in &self.atoms {
            let outgoing: u32 = self
                .transfers
                .iter()
                .filter(|t| t.from_atom_id == atom.id)
                .map(|t| t.count)
                .sum();
            let incoming: u32 = self
                .transfers
                .iter()
                .filter(|t| t.to_atom_id == atom.id)
                .map(|t| t.count)
                .sum();

            if outgoing > 0 && !atom.role.is_source() {
                return Err(invalid(format!("atom '{}' donates but is not a source", atom.id)));
            }
            if incoming > 0 && !atom.role.is_target() {
                return Err(invalid(format!("atom '{}' accepts but is not a target", atom.id)));
            }
            if outgoing > atom.valence_electrons {
                return Err(invalid(format!(
                    "atom '{}' must give {outgoing} electrons but holds {}",
                    atom.id, atom.valence_electrons
                )));
            }
            if incoming > atom.target_slots {
                return Err(invalid(format!(
                    "atom '{}' must take {incoming} electrons but has {} slots",
                    atom.id, atom.target_slots
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioDocument {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// Ordered, append-only collection of scenarios.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scenarios: Vec<Arc<Scenario>>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin::scenarios().into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let document: ScenarioDocument = toml::from_str(raw)?;
        let mut catalog = Self::default();
        for scenario in document.scenarios {
            catalog.push(scenario)?;
        }
        Ok(catalog)
    }

    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            scenarios = catalog.len(),
            "loaded scenario file"
        );
        Ok(catalog)
    }

    /// Appends `other` after the existing entries, preserving its order.
    pub fn extend(&mut self, other: Catalog) -> Result<(), CatalogError> {
        for scenario in &other.scenarios {
            if self.contains(&scenario.id) {
                return Err(CatalogError::DuplicateScenario(scenario.id.clone()));
            }
        }
        self.scenarios.extend(other.scenarios);
        Ok(())
    }

    pub fn push(&mut self, scenario: Scenario) -> Result<(), CatalogError> {
        scenario.validate()?;
        if self.contains(&scenario.id) {
            return Err(CatalogError::DuplicateScenario(scenario.id));
        }
        self.scenarios.push(Arc::new(scenario));
        Ok(())
    }

    pub fn list(&self) -> &[Arc<Scenario>] {
        &self.scenarios
    }

    pub fn get(&self, id: &ScenarioId) -> Result<Arc<Scenario>, RedoxError> {
        self.scenarios
            .iter()
            .find(|scenario| &scenario.id == id)
            .cloned()
            .ok_or_else(|| RedoxError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &ScenarioId) -> bool {
        self.scenarios.iter().any(|scenario| &scenario.id == id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
