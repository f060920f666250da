use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{AtomId, AtomState, ScenarioId, TransferKey};

/// One gameplay snapshot. Owns its atoms; never aliases the scenario template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub scenario_id: ScenarioId,
    pub atoms: Vec<AtomState>,
    /// Absent keys count as zero.
    pub transferred: BTreeMap<TransferKey, u32>,
    pub is_complete: bool,
}

impl GameState {
    pub fn atom(&self, id: &AtomId) -> Option<&AtomState> {
        self.atoms.iter().find(|atom| &atom.id == id)
    }

    pub(crate) fn atom_mut(&mut self, id: &AtomId) -> Option<&mut AtomState> {
        self.atoms.iter_mut().find(|atom| &atom.id == id)
    }

    pub fn transferred_count(&self, key: &TransferKey) -> u32 {
        self.transferred.get(key).copied().unwrap_or(0)
    }
}
