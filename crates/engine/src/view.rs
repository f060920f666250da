use shared::{
    domain::{AtomState, Point},
    protocol::{AtomView, SceneView},
};

use crate::{state::GameState, transfer::TransferEngine};

pub fn scene(
    engine: &TransferEngine,
    state: &GameState,
    revision: u64,
    ghost: Option<Point>,
) -> SceneView {
    SceneView {
        scenario_id: state.scenario_id.clone(),
        revision,
        is_complete: state.is_complete,
        ghost,
        atoms: state
            .atoms
            .iter()
            .map(|atom| atom_view(atom, engine.can_drag_from(state, &atom.id)))
            .collect(),
    }
}

fn atom_view(atom: &AtomState, draggable: bool) -> AtomView {
    AtomView {
        id: atom.id.clone(),
        symbol: atom.symbol.clone(),
        name: atom.name.clone(),
        role: atom.role,
        position: atom.center(),
        radius: atom.radius,
        color: atom.color.clone(),
        opacity: atom.opacity,
        scale: atom.scale,
        charge_label: charge_label(&atom.charge),
        electron_markers: atom.valence_electrons,
        empty_slot_markers: if atom.role.is_target() {
            atom.target_slots
        } else {
            0
        },
        marker_step_degrees: 360.0 / f64::from(atom.max_valence.max(8)),
        draggable,
    }
}

fn charge_label(charge: &str) -> String {
    if charge == "0" {
        String::new()
    } else {
        charge.to_string()
    }
}
