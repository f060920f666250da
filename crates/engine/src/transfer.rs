//! Transfer bookkeeping: drag permission, drop resolution, commit and completion.

use std::{collections::BTreeMap, sync::Arc};

use catalog::Scenario;
use shared::{
    domain::{AtomId, Point, TransferKey, TransferRequirement},
    error::{RedoxError, RejectReason},
};
use tracing::{debug, info, warn};

use crate::state::GameState;

/// Extra reach around a target atom when resolving a drop.
pub const DROP_HIT_MARGIN: f64 = 30.0;
/// Extra reach around a source atom when starting a drag.
pub const DRAG_START_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetResolution {
    Matched(AtomId),
    NoMatch,
}

#[derive(Debug, Clone)]
pub struct TransferEngine {
    scenario: Arc<Scenario>,
}

impl TransferEngine {
    pub fn new(scenario: Arc<Scenario>) -> Self {
        Self { scenario }
    }

    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    pub fn initialize(&self) -> GameState {
        GameState {
            scenario_id: self.scenario.id.clone(),
            atoms: self.scenario.atoms.clone(),
            transferred: BTreeMap::new(),
            is_complete: false,
        }
    }

    pub fn reset(&self) -> GameState {
        info!(scenario = %self.scenario.id, "scenario reset");
        self.initialize()
    }

    pub fn can_drag_from(&self, state: &GameState, atom_id: &AtomId) -> bool {
        !state.is_complete
            && state
                .atom(atom_id)
                .is_some_and(|atom| atom.role.is_source() && atom.valence_electrons > 0)
    }

    /// First atom, in authoring order, whose drag region contains `point`
    /// and which may currently donate.
    pub fn drag_source_at(&self, state: &GameState, point: Point) -> Option<AtomId> {
        state
            .atoms
            .iter()
            .filter(|atom| atom.hit_by(point, DRAG_START_MARGIN))
            .map(|atom| &atom.id)
            .find(|id| self.can_drag_from(state, id))
            .cloned()
    }

    pub fn resolve_drop(
        &self,
        state: &GameState,
        from: &AtomId,
        drop_point: Point,
    ) -> TargetResolution {
        if state.is_complete {
            return TargetResolution::NoMatch;
        }

        self.scenario
            .transfers
            .iter()
            .filter(|req| &req.from_atom_id == from && self.remaining(state, req) > 0)
            .find(|req| {
                state
                    .atom(&req.to_atom_id)
                    .is_some_and(|target| target.hit_by(drop_point, DROP_HIT_MARGIN))
            })
            .map_or(TargetResolution::NoMatch, |req| {
                TargetResolution::Matched(req.to_atom_id.clone())
            })
    }

    /// Moves one electron from `from` to `to`, returning the next snapshot.
    /// The input snapshot is left untouched.
    pub fn commit(
        &self,
        state: &GameState,
        from: &AtomId,
        to: &AtomId,
    ) -> Result<GameState, RedoxError> {
        if let Err(reason) = self.check_commit(state, from, to) {
            warn!(scenario = %self.scenario.id, %from, %to, ?reason, "transfer rejected");
            return Err(RedoxError::invalid_transfer(from, to, reason));
        }

        let mut next = state.clone();
        let key = TransferKey::new(from.clone(), to.clone());
        *next.transferred.entry(key).or_insert(0) += 1;

        if let Some(source) = next.atom_mut(from) {
            source.valence_electrons -= 1;
        }
        if let Some(target) = next.atom_mut(to) {
            target.valence_electrons += 1;
            target.target_slots -= 1;
        }
        debug!(scenario = %self.scenario.id, %from, %to, "electron transferred");

        if self.is_satisfied(&next) {
            self.complete(&mut next);
        }

        Ok(next)
    }

    /// True when every requirement has reached its count.
    pub fn is_satisfied(&self, state: &GameState) -> bool {
        self.scenario
            .transfers
            .iter()
            .all(|req| state.transferred_count(&req.key()) >= req.count)
    }

    pub fn remaining(&self, state: &GameState, req: &TransferRequirement) -> u32 {
        req.count.saturating_sub(state.transferred_count(&req.key()))
    }

    fn check_commit(&self, state: &GameState, from: &AtomId, to: &AtomId) -> Result<(), RejectReason> {
        if state.scenario_id != self.scenario.id {
            return Err(RejectReason::ForeignState);
        }
        if state.is_complete {
            return Err(RejectReason::AlreadyComplete);
        }

        let mut pair = self
            .scenario
            .transfers
            .iter()
            .filter(|req| req.connects(from, to))
            .peekable();
        if pair.peek().is_none() {
            return Err(RejectReason::NoRequirement);
        }
        if !pair.any(|req| self.remaining(state, req) > 0) {
            return Err(RejectReason::RequirementSatisfied);
        }

        let (Some(source), Some(target)) = (state.atom(from), state.atom(to)) else {
            return Err(RejectReason::NoRequirement);
        };
        if !source.role.is_source() || !target.role.is_target() {
            return Err(RejectReason::RoleMismatch);
        }
        if source.valence_electrons == 0 {
            return Err(RejectReason::SourceDepleted);
        }
        if target.target_slots == 0 {
            return Err(RejectReason::TargetFull);
        }

        Ok(())
    }

    fn complete(&self, state: &mut GameState) {
        if let Some(transform) = &self.scenario.completion {
            for atom in &mut state.atoms {
                if let Some(rewrite) = transform.for_role(atom.role) {
                    atom.apply_override(rewrite);
                }
            }
        }
        state.is_complete = true;
        info!(scenario = %self.scenario.id, "scenario complete");
    }
}

#[cfg(test)]
#[path = "tests/transfer_tests.rs"]
mod tests;
