//! Menu and per-level session state.

use std::{mem, sync::Arc};

use catalog::{Catalog, Scenario};
use shared::{
    domain::{AtomId, Point, ScenarioId},
    error::RedoxError,
    protocol::SceneView,
};
use tracing::info;

use crate::{
    explanation::{ExplanationRequest, ExplanationSlot, ExplanationTicket},
    state::GameState,
    transfer::TransferEngine,
    view,
};

/// One open level: the current snapshot plus the one it replaced.
#[derive(Debug, Clone)]
pub struct Session {
    engine: TransferEngine,
    state: GameState,
    previous: Option<GameState>,
    revision: u64,
    explanation: ExplanationSlot,
}

impl Session {
    pub fn new(scenario: Arc<Scenario>) -> Self {
        let engine = TransferEngine::new(scenario);
        let state = engine.initialize();
        Self {
            engine,
            state,
            previous: None,
            revision: 0,
            explanation: ExplanationSlot::Empty,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        self.engine.scenario()
    }

    pub fn engine(&self) -> &TransferEngine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn previous(&self) -> Option<&GameState> {
        self.previous.as_ref()
    }

    /// Bumped on every snapshot change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    pub fn commit(&mut self, from: &AtomId, to: &AtomId) -> Result<&GameState, RedoxError> {
        let next = self.engine.commit(&self.state, from, to)?;
        self.replace_state(next);
        Ok(&self.state)
    }

    pub fn reset(&mut self) {
        let fresh = self.engine.reset();
        self.replace_state(fresh);
    }

    pub fn explanation(&self) -> &ExplanationSlot {
        &self.explanation
    }

    pub fn request_explanation(&mut self) -> Option<ExplanationRequest> {
        let prompt = self.engine.scenario().explanation_prompt.clone();
        self.explanation.begin(&prompt)
    }

    pub fn fulfil_explanation(&mut self, ticket: ExplanationTicket, text: String) -> bool {
        self.explanation.fulfil(ticket, text)
    }

    pub fn view(&self, ghost: Option<Point>) -> SceneView {
        view::scene(&self.engine, &self.state, self.revision, ghost)
    }

    fn replace_state(&mut self, next: GameState) {
        self.previous = Some(mem::replace(&mut self.state, next));
        self.revision += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: ScenarioId,
    pub level: u32,
    pub title: String,
    pub equation: String,
    pub summary: String,
}

/// Scenario menu with at most one open session.
#[derive(Debug)]
pub struct Simulator {
    catalog: Catalog,
    current: Option<Session>,
}

impl Simulator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            current: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        self.catalog
            .list()
            .iter()
            .map(|scenario| MenuEntry {
                id: scenario.id.clone(),
                level: scenario.level,
                title: scenario.title.clone(),
                equation: scenario.equation.clone(),
                summary: scenario.summary().to_string(),
            })
            .collect()
    }

    /// Opens a fresh session, discarding the current one.
    pub fn select(&mut self, id: &ScenarioId) -> Result<&mut Session, RedoxError> {
        let scenario = self.catalog.get(id)?;
        info!(scenario = %id, "scenario selected");
        Ok(self.current.insert(Session::new(scenario)))
    }

    /// Returns to the menu. Nothing about the discarded session is kept.
    pub fn back(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Session> {
        self.current.as_mut()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
