//! Read contract handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::{AtomId, AtomRole, Point, ScenarioId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomView {
    pub id: AtomId,
    pub symbol: String,
    pub name: String,
    pub role: AtomRole,
    pub position: Point,
    pub radius: f64,
    pub color: String,
    pub opacity: f64,
    pub scale: f64,
    /// Charge superscript; empty for a neutral atom.
    pub charge_label: String,
    pub electron_markers: u32,
    pub empty_slot_markers: u32,
    /// Angular spacing between valence markers, in degrees.
    pub marker_step_degrees: f64,
    pub draggable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneView {
    pub scenario_id: ScenarioId,
    pub revision: u64,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost: Option<Point>,
    pub atoms: Vec<AtomView>,
}

impl SceneView {
    pub fn atom(&self, id: &AtomId) -> Option<&AtomView> {
        self.atoms.iter().find(|atom| &atom.id == id)
    }
}

/// Renders scene snapshots. Called again whenever the revision changes.
pub trait Presenter {
    fn present(&mut self, view: &SceneView);
}
